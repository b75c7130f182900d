use core::time::Duration;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Pause a renderer should leave between starting and completing a merge so
/// the collapse can be animated.
pub const MERGE_DELAY: Duration = Duration::from_millis(300);

/// Neighbor that matched a placed tile, with the direction it sits in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeMatch {
    pub slot: SlotIndex,
    pub direction: Direction,
}

pub type MatchList = SmallVec<[MergeMatch; 4]>;

/// A merge whose score is already counted but whose board update is still
/// outstanding.
///
/// Handed back to [`MergeResolver::complete_merge`] once the caller is done
/// pacing, it can only be completed once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "the board stays locked until the merge is completed"]
pub struct PendingMerge {
    instance: InstanceId,
    serial: u32,
    origin: SlotIndex,
    tile: Tile,
    result: Tile,
    matches: MatchList,
}

impl PendingMerge {
    /// Slot the merge collapses into.
    pub fn origin(&self) -> SlotIndex {
        self.origin
    }

    /// Tile that triggered the merge.
    pub fn tile(&self) -> Tile {
        self.tile
    }

    /// Tile placed at the origin once the merge completes.
    pub fn result(&self) -> Tile {
        self.result
    }

    pub fn matches(&self) -> &[MergeMatch] {
        &self.matches
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    Occupied,
    Locked,
    Finished,
    /// The merge belongs to a discarded game or was already completed.
    StaleMerge,
}

#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub enum PlaceOutcome {
    Rejected(RejectReason),
    /// Chain settled, the board accepts input again.
    Placed,
    /// Chain settled on a full board, the game is over.
    Finished,
    Merging(PendingMerge),
}

impl PlaceOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }

    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Placed | Self::Finished)
    }
}

/// Placement and cascade rules, operating on whatever board it is given.
#[derive(Copy, Clone, Debug, Default)]
pub struct MergeResolver;

impl MergeResolver {
    /// Places the board's next tile at `index`, drawing its replacement from
    /// `ranks` if the placement is accepted.
    pub fn place<S: RankSource + ?Sized>(
        board: &mut Board,
        index: SlotIndex,
        ranks: &mut S,
    ) -> Result<PlaceOutcome> {
        let index = board.validate_index(index)?;
        if let Some(reason) = Self::check_accepting(board, index) {
            log::debug!("Placement at {} rejected: {:?}", index, reason);
            return Ok(PlaceOutcome::Rejected(reason));
        }

        let tile = board.take_next_tile(ranks);
        log::debug!("Placing {} at {}, next tile {}", tile, index, board.next_tile());
        Ok(Self::lay_down(board, index, tile))
    }

    /// Places an arbitrary tile, such as a special obstacle, without touching
    /// the next tile.
    pub fn place_tile(board: &mut Board, index: SlotIndex, tile: Tile) -> Result<PlaceOutcome> {
        let index = board.validate_index(index)?;
        if tile.is_empty() {
            return Err(GameError::InvalidRank);
        }
        if let Some(reason) = Self::check_accepting(board, index) {
            log::debug!("Placement of {} at {} rejected: {:?}", tile, index, reason);
            return Ok(PlaceOutcome::Rejected(reason));
        }

        Ok(Self::lay_down(board, index, tile))
    }

    /// Neighbors of `index` holding the same tile, in scan order.
    ///
    /// Empty when the tile at `index` cannot merge.
    pub fn scan(board: &Board, index: SlotIndex) -> Result<MatchList> {
        let tile = board.tile_at(index)?;
        if !tile.is_mergeable() {
            return Ok(MatchList::new());
        }

        Ok(Self::matches_at(board, index, tile))
    }

    /// Clears a pending merge and places the upgraded tile at its origin,
    /// which may start the next merge of the cascade.
    ///
    /// A merge from a discarded game or one that was already completed is
    /// ignored.
    pub fn complete_merge(board: &mut Board, merge: PendingMerge) -> PlaceOutcome {
        if merge.instance != board.instance() || !board.close_merge(merge.serial) {
            log::warn!(
                "Ignoring stale merge at {} for {:?}, board is {:?}",
                merge.origin,
                merge.instance,
                board.instance()
            );
            return PlaceOutcome::Rejected(RejectReason::StaleMerge);
        }

        for m in &merge.matches {
            board.clear(m.slot);
        }
        board.clear(merge.origin);

        Self::lay_down(board, merge.origin, merge.result)
    }

    /// Completes merges until the chain settles, for callers that do not
    /// animate.
    pub fn resolve(board: &mut Board, mut outcome: PlaceOutcome) -> PlaceOutcome {
        while let PlaceOutcome::Merging(merge) = outcome {
            outcome = Self::complete_merge(board, merge);
        }
        outcome
    }

    fn check_accepting(board: &Board, index: SlotIndex) -> Option<RejectReason> {
        if board.is_finished() {
            Some(RejectReason::Finished)
        } else if board.is_input_locked() {
            Some(RejectReason::Locked)
        } else if !board[index].is_empty() {
            Some(RejectReason::Occupied)
        } else {
            None
        }
    }

    fn lay_down(board: &mut Board, index: SlotIndex, tile: Tile) -> PlaceOutcome {
        board.write(index, tile);
        board.lock();

        let Some(result) = tile.upgraded() else {
            return Self::settle(board);
        };

        let matches = Self::matches_at(board, index, tile);
        if matches.is_empty() {
            Self::settle(board)
        } else {
            PlaceOutcome::Merging(Self::begin_merge(board, index, tile, result, matches))
        }
    }

    fn matches_at(board: &Board, index: SlotIndex, tile: Tile) -> MatchList {
        NeighborIter::new(index)
            .filter(|&(_, target)| board[target] == tile)
            .map(|(direction, slot)| MergeMatch { slot, direction })
            .collect()
    }

    fn begin_merge(
        board: &mut Board,
        origin: SlotIndex,
        tile: Tile,
        result: Tile,
        matches: MatchList,
    ) -> PendingMerge {
        board.add_point();
        let serial = board.open_merge();
        log::debug!(
            "Merging {} at {} with {} neighbor(s) into {}, score {}",
            tile,
            origin,
            matches.len(),
            result,
            board.score()
        );

        PendingMerge {
            instance: board.instance(),
            serial,
            origin,
            tile,
            result,
            matches,
        }
    }

    fn settle(board: &mut Board) -> PlaceOutcome {
        board.unlock();
        if board.is_full() {
            board.finish();
            log::debug!("Board full, finished with score {}", board.score());
            PlaceOutcome::Finished
        } else {
            PlaceOutcome::Placed
        }
    }
}
