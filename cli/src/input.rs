use anyhow::{Context, Result, bail};
use kittymerge_core::{COLS, ROWS, SlotIndex, to_index};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Place(SlotIndex),
    Restart,
    Quit,
}

/// Parses `<row> <col>` (1-based), a 0-based slot index, `restart` or `quit`.
pub(crate) fn parse_command(line: &str) -> Result<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["q" | "quit" | "exit"] => Ok(Command::Quit),
        ["r" | "restart"] => Ok(Command::Restart),
        [index] => {
            let index = index
                .parse()
                .with_context(|| format!("Not a slot index: {index}"))?;
            Ok(Command::Place(index))
        }
        [row, col] => {
            let row: usize = row.parse().with_context(|| format!("Not a row: {row}"))?;
            let col: usize = col.parse().with_context(|| format!("Not a column: {col}"))?;
            if !(1..=ROWS).contains(&row) || !(1..=COLS).contains(&col) {
                bail!("Row and column must be within 1..={ROWS} and 1..={COLS}");
            }
            Ok(Command::Place(to_index((row - 1, col - 1))))
        }
        _ => bail!("Expected `<row> <col>`, a slot index, `restart` or `quit`"),
    }
}
