use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Number of ordinary tile ranks.
pub const N_TYPES: Rank = 6;

/// Rank reserved for the special obstacle tile.
pub const SPECIAL_RANK: Rank = N_TYPES + 1;

/// Content of a single slot: empty, a ranked tile, or the special obstacle.
///
/// Tiles are plain values, two tiles of the same rank are interchangeable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Rank", into = "Rank")]
pub struct Tile(Rank);

impl Tile {
    pub const EMPTY: Tile = Tile(0);
    pub const SPECIAL: Tile = Tile(SPECIAL_RANK);

    pub fn new(rank: Rank) -> Result<Self> {
        if rank <= SPECIAL_RANK {
            Ok(Self(rank))
        } else {
            Err(GameError::InvalidRank)
        }
    }

    pub const fn rank(self) -> Rank {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn is_special(self) -> bool {
        self.0 == SPECIAL_RANK
    }

    /// Tile a merge of this rank turns into.
    ///
    /// Only ranks below [`N_TYPES`] have one, so a merge can never produce the
    /// special rank.
    pub const fn upgraded(self) -> Option<Tile> {
        if self.0 >= 1 && self.0 < N_TYPES {
            Some(Tile(self.0 + 1))
        } else {
            None
        }
    }

    /// Whether placing this tile triggers a neighbor scan.
    pub const fn is_mergeable(self) -> bool {
        self.upgraded().is_some()
    }
}

impl TryFrom<Rank> for Tile {
    type Error = GameError;

    fn try_from(rank: Rank) -> Result<Self> {
        Self::new(rank)
    }
}

impl From<Tile> for Rank {
    fn from(tile: Tile) -> Self {
        tile.0
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EMPTY => f.write_str("."),
            Self::SPECIAL => f.write_str("#"),
            Self(rank) => write!(f, "{rank}"),
        }
    }
}

/// Opaque per-slot identifier, renewed every time a slot is written.
///
/// Lets a renderer tell a freshly placed tile apart from the one that was
/// there before, it carries no game meaning.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId(pub(crate) u32);

/// Canonical slot state stored by the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub tile: Tile,
    pub id: CellId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_above_special_are_rejected() {
        assert_eq!(Tile::new(SPECIAL_RANK), Ok(Tile::SPECIAL));
        assert_eq!(Tile::new(SPECIAL_RANK + 1), Err(GameError::InvalidRank));
    }

    #[test]
    fn top_rank_has_no_successor() {
        assert_eq!(Tile::new(1).unwrap().upgraded(), Some(Tile::new(2).unwrap()));
        assert_eq!(Tile::new(N_TYPES - 1).unwrap().upgraded(), Some(Tile::new(N_TYPES).unwrap()));
        assert_eq!(Tile::new(N_TYPES).unwrap().upgraded(), None);
        assert!(!Tile::SPECIAL.is_mergeable());
        assert!(!Tile::EMPTY.is_mergeable());
    }

    #[test]
    fn deserializing_rejects_invalid_rank() {
        assert_eq!(serde_json::from_str::<Tile>("3").unwrap(), Tile::new(3).unwrap());
        assert!(serde_json::from_str::<Tile>("9").is_err());
    }
}
