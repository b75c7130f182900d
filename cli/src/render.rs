use kittymerge_core::{Board, COLS, ROWS, Score, SlotIndex, to_index};

/// Text view of the board, marking `highlight` slots (tiles about to merge).
pub(crate) fn render_board(board: &Board, best: Score, highlight: &[SlotIndex]) -> String {
    let mut out = format!(
        "Score {}   Best {}   Next {}\n",
        board.score(),
        best,
        board.next_tile()
    );

    out.push_str("    ");
    for col in 0..COLS {
        out.push_str(&format!(" {:>2} ", col + 1));
    }
    out.push('\n');

    for row in 0..ROWS {
        out.push_str(&format!(" {:>2} ", row + 1));
        for col in 0..COLS {
            let index = to_index((row, col));
            let tile = board[index];
            if highlight.contains(&index) {
                out.push_str(&format!(" [{tile}]"));
            } else {
                out.push_str(&format!("  {tile} "));
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kittymerge_core::{SIZE, SPECIAL_RANK};

    #[test]
    fn renders_tiles_and_highlights() {
        let mut ranks = vec![0; SIZE];
        ranks[0] = 1;
        ranks[6] = 2;
        ranks[24] = SPECIAL_RANK;
        let board = Board::from_ranks(&ranks, 3).unwrap();

        let text = render_board(&board, 4, &[6]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Score 0   Best 4   Next 3");
        assert_eq!(lines[2], "  1   1   .   .   .   . ");
        assert_eq!(lines[3], "  2   .  [2]  .   .   . ");
        assert_eq!(lines[6], "  5   .   .   .   .   # ");
    }
}
