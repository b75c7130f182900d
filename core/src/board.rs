use core::ops::Index;
use core::sync::atomic::{AtomicU32, Ordering};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Phase of the placement protocol, derived from the board flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Idle,
    Resolving,
    Finished,
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

static NEXT_INSTANCE: AtomicU32 = AtomicU32::new(0);

/// Identifies one game instance, unique for every board created in this
/// process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(u32);

impl InstanceId {
    fn fresh() -> Self {
        Self(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }
}

/// Grid of slots plus the tile waiting to be placed.
///
/// Only the [`MergeResolver`] mutates a board, everything public here is a
/// read-only query for renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    cells: Array2<Cell>,
    next_tile: Tile,
    score: Score,
    input_locked: bool,
    finished: bool,
    instance: InstanceId,
    last_cell_id: u32,
    merge_serial: u32,
    pending_merge: Option<u32>,
}

/// Unchecked wire form of a [`Board`].
#[derive(Deserialize)]
struct BoardSnapshot {
    cells: Array2<Cell>,
    next_tile: Tile,
    score: Score,
    input_locked: bool,
    finished: bool,
    instance: InstanceId,
    last_cell_id: u32,
    merge_serial: u32,
    pending_merge: Option<u32>,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = GameError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self> {
        if snapshot.cells.dim() != (ROWS, COLS) {
            return Err(GameError::InvalidBoardShape);
        }
        if !(MIN_DRAW_RANK..=MAX_DRAW_RANK).contains(&snapshot.next_tile.rank()) {
            return Err(GameError::InvalidRank);
        }
        // locked exactly while a merge is outstanding, never once finished
        if snapshot.input_locked != snapshot.pending_merge.is_some()
            || (snapshot.finished && snapshot.input_locked)
        {
            return Err(GameError::InconsistentState);
        }

        Ok(Self {
            cells: snapshot.cells,
            next_tile: snapshot.next_tile,
            score: snapshot.score,
            input_locked: snapshot.input_locked,
            finished: snapshot.finished,
            instance: snapshot.instance,
            last_cell_id: snapshot.last_cell_id,
            merge_serial: snapshot.merge_serial,
            pending_merge: snapshot.pending_merge,
        })
    }
}

impl Board {
    /// Fresh empty board with a newly drawn next tile.
    pub fn create<S: RankSource + ?Sized>(ranks: &mut S) -> Self {
        let board = Self::with_tiles(draw_next_tile(ranks));
        log::debug!("New board {:?}, next tile {}", board.instance, board.next_tile);
        board
    }

    /// Prepared board from row-major ranks, e.g. a puzzle with special
    /// obstacles already in place.
    ///
    /// A board prepared without empty slots starts out finished.
    pub fn from_ranks(ranks: &[Rank], next_rank: Rank) -> Result<Self> {
        if ranks.len() != SIZE {
            return Err(GameError::InvalidBoardShape);
        }
        if !(MIN_DRAW_RANK..=MAX_DRAW_RANK).contains(&next_rank) {
            return Err(GameError::InvalidRank);
        }

        let mut board = Self::with_tiles(Tile::new(next_rank)?);
        for (index, &rank) in ranks.iter().enumerate() {
            board.write(index, Tile::new(rank)?);
        }
        board.finished = board.is_full();
        Ok(board)
    }

    fn with_tiles(next_tile: Tile) -> Self {
        let mut cells: Array2<Cell> = Array2::default((ROWS, COLS));
        for (id, cell) in cells.iter_mut().enumerate() {
            cell.id = CellId(id as u32);
        }
        Self {
            cells,
            next_tile,
            score: 0,
            input_locked: false,
            finished: false,
            instance: InstanceId::fresh(),
            last_cell_id: SIZE as u32,
            merge_serial: 0,
            pending_merge: None,
        }
    }

    pub fn validate_index(&self, index: SlotIndex) -> Result<SlotIndex> {
        if index < SIZE {
            Ok(index)
        } else {
            Err(GameError::OutOfRange)
        }
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.tile.is_empty())
    }

    pub fn is_occupied(&self, index: SlotIndex) -> Result<bool> {
        Ok(!self.tile_at(index)?.is_empty())
    }

    pub fn tile_at(&self, index: SlotIndex) -> Result<Tile> {
        let index = self.validate_index(index)?;
        Ok(self[index])
    }

    pub fn cell_id_at(&self, index: SlotIndex) -> Result<CellId> {
        let index = self.validate_index(index)?;
        Ok(self.cells[nd_index(index)].id)
    }

    /// Tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().map(|cell| cell.tile)
    }

    pub fn empty_count(&self) -> usize {
        self.tiles().filter(|tile| tile.is_empty()).count()
    }

    pub fn next_tile(&self) -> Tile {
        self.next_tile
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn state(&self) -> EngineState {
        if self.finished {
            EngineState::Finished
        } else if self.input_locked {
            EngineState::Resolving
        } else {
            EngineState::Idle
        }
    }

    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    pub fn has_pending_merge(&self) -> bool {
        self.pending_merge.is_some()
    }

    pub(crate) fn write(&mut self, index: SlotIndex, tile: Tile) {
        self.last_cell_id = self.last_cell_id.wrapping_add(1);
        self.cells[nd_index(index)] = Cell {
            tile,
            id: CellId(self.last_cell_id),
        };
    }

    pub(crate) fn clear(&mut self, index: SlotIndex) {
        self.write(index, Tile::EMPTY);
    }

    /// Hands out the current next tile and draws its replacement.
    pub(crate) fn take_next_tile<S: RankSource + ?Sized>(&mut self, ranks: &mut S) -> Tile {
        core::mem::replace(&mut self.next_tile, draw_next_tile(ranks))
    }

    pub(crate) fn lock(&mut self) {
        self.input_locked = true;
    }

    pub(crate) fn unlock(&mut self) {
        self.input_locked = false;
    }

    pub(crate) fn finish(&mut self) {
        self.finished = true;
    }

    pub(crate) fn add_point(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    /// Registers an outstanding merge and returns its serial.
    pub(crate) fn open_merge(&mut self) -> u32 {
        self.merge_serial = self.merge_serial.wrapping_add(1);
        self.pending_merge = Some(self.merge_serial);
        self.merge_serial
    }

    /// Consumes the outstanding merge if `serial` matches it.
    pub(crate) fn close_merge(&mut self, serial: u32) -> bool {
        if self.pending_merge == Some(serial) {
            self.pending_merge = None;
            true
        } else {
            false
        }
    }
}

impl Index<SlotIndex> for Board {
    type Output = Tile;

    fn index(&self, index: SlotIndex) -> &Self::Output {
        &self.cells[nd_index(index)].tile
    }
}

fn nd_index(index: SlotIndex) -> [usize; 2] {
    let (row, col) = to_coords(index);
    [row, col]
}
