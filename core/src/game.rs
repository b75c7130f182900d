use crate::*;

/// Receives the final score of every finished game.
pub trait RecordBest {
    fn record_best(&mut self, score: Score);
}

impl<F: FnMut(Score)> RecordBest for F {
    fn record_best(&mut self, score: Score) {
        self(score)
    }
}

/// One playing session: the active board, where next tiles come from, and
/// where final scores go.
///
/// A restart swaps in a new board, merges still pending for the old one are
/// ignored when completed.
#[derive(Debug)]
pub struct Game<S, P> {
    board: Board,
    ranks: S,
    record: P,
}

impl<S: RankSource, P: RecordBest> Game<S, P> {
    pub fn new(mut ranks: S, record: P) -> Self {
        let board = Board::create(&mut ranks);
        Self {
            board,
            ranks,
            record,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> EngineState {
        self.board.state()
    }

    pub fn record(&self) -> &P {
        &self.record
    }

    /// Places the next tile at `index`.
    pub fn place(&mut self, index: SlotIndex) -> Result<PlaceOutcome> {
        let outcome = MergeResolver::place(&mut self.board, index, &mut self.ranks)?;
        Ok(self.report(outcome))
    }

    pub fn place_tile(&mut self, index: SlotIndex, tile: Tile) -> Result<PlaceOutcome> {
        let outcome = MergeResolver::place_tile(&mut self.board, index, tile)?;
        Ok(self.report(outcome))
    }

    pub fn complete_merge(&mut self, merge: PendingMerge) -> PlaceOutcome {
        let outcome = MergeResolver::complete_merge(&mut self.board, merge);
        self.report(outcome)
    }

    /// Completes every merge of the chain right away.
    pub fn resolve(&mut self, mut outcome: PlaceOutcome) -> PlaceOutcome {
        while let PlaceOutcome::Merging(merge) = outcome {
            outcome = self.complete_merge(merge);
        }
        outcome
    }

    /// Places the next tile and settles the whole cascade without pacing.
    pub fn place_and_resolve(&mut self, index: SlotIndex) -> Result<PlaceOutcome> {
        let outcome = self.place(index)?;
        Ok(self.resolve(outcome))
    }

    /// Discards the current board and starts over on a fresh one.
    pub fn reset(&mut self) {
        log::debug!(
            "Restarting, discarding {:?} with score {}",
            self.board.instance(),
            self.board.score()
        );
        self.board = Board::create(&mut self.ranks);
    }

    fn report(&mut self, outcome: PlaceOutcome) -> PlaceOutcome {
        if outcome == PlaceOutcome::Finished {
            log::info!("Game over, score {}", self.board.score());
            self.record.record_best(self.board.score());
        }
        outcome
    }
}
