use serde::{Deserialize, Serialize};

/// Tile rank, `0` meaning empty.
pub type Rank = u8;

/// Merge event count.
pub type Score = u32;

/// Row-major position of a slot on the board.
pub type SlotIndex = usize;

/// Board position as `(row, col)`.
pub type Coord2 = (usize, usize);

pub const ROWS: usize = 5;
pub const COLS: usize = 5;
pub const SIZE: usize = ROWS * COLS;

pub const fn to_coords(index: SlotIndex) -> Coord2 {
    (index / COLS, index % COLS)
}

pub const fn to_index((row, col): Coord2) -> SlotIndex {
    row * COLS + col
}

/// Axis directions in neighbor scan order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Row-major offset of the neighbor in this direction.
    pub const fn offset(self) -> isize {
        match self {
            Self::Up => -(COLS as isize),
            Self::Down => COLS as isize,
            Self::Left => -1,
            Self::Right => 1,
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Slot next to `index` in `dir`, if it is on the board.
///
/// Horizontal neighbors must share the row of `index`, so the last column of
/// one row is never adjacent to the first column of the next.
pub fn neighbor(index: SlotIndex, dir: Direction) -> Option<SlotIndex> {
    let target = index.checked_add_signed(dir.offset())?;
    if target >= SIZE {
        return None;
    }
    if dir.is_horizontal() && (index % COLS).abs_diff(target % COLS) != 1 {
        return None;
    }
    Some(target)
}

/// Iterates the on-board neighbors of a slot in [`Direction::ALL`] order.
#[derive(Debug)]
pub struct NeighborIter {
    center: SlotIndex,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: SlotIndex) -> Self {
        Self { center, index: 0 }
    }
}

impl Iterator for NeighborIter {
    type Item = (Direction, SlotIndex);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let dir = *Direction::ALL.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(target) = neighbor(self.center, dir) {
                return Some((dir, target));
            }
        }
    }
}
