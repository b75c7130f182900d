use crate::*;
pub use random::*;

mod random;

/// Lowest rank handed out as a next tile.
pub const MIN_DRAW_RANK: Rank = 1;

/// Highest rank handed out as a next tile.
pub const MAX_DRAW_RANK: Rank = 3;

/// Supplies ranks for the tile the player places next.
pub trait RankSource {
    /// Returns a rank in `MIN_DRAW_RANK..=MAX_DRAW_RANK`.
    fn draw_next_rank(&mut self) -> Rank;
}

impl<S: RankSource + ?Sized> RankSource for &mut S {
    fn draw_next_rank(&mut self) -> Rank {
        (**self).draw_next_rank()
    }
}

/// Draws a next tile, clamping whatever the source hands out into the
/// drawable range.
pub fn draw_next_tile<S: RankSource + ?Sized>(source: &mut S) -> Tile {
    let rank = source.draw_next_rank();
    let clamped = rank.clamp(MIN_DRAW_RANK, MAX_DRAW_RANK);
    if clamped != rank {
        log::warn!(
            "Rank source returned {}, outside {}..={}, using {} instead",
            rank,
            MIN_DRAW_RANK,
            MAX_DRAW_RANK,
            clamped
        );
    }
    // clamped into 1..=3, always a valid rank
    Tile::new(clamped).unwrap_or_default()
}
