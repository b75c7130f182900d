use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform rank source backed by a seeded small RNG.
///
/// The same seed always produces the same sequence of next tiles.
#[derive(Clone, Debug)]
pub struct RandomRankSource {
    rng: SmallRng,
}

impl RandomRankSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RankSource for RandomRankSource {
    fn draw_next_rank(&mut self) -> Rank {
        self.rng.random_range(MIN_DRAW_RANK..=MAX_DRAW_RANK)
    }
}

/// Replays a fixed list of ranks, starting over once exhausted.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedRankSource {
    ranks: Vec<Rank>,
    position: usize,
}

impl ScriptedRankSource {
    pub fn new(ranks: &[Rank]) -> Self {
        let mut ranks = ranks.to_vec();
        if ranks.is_empty() {
            log::warn!("Empty rank script, falling back to rank {}", MIN_DRAW_RANK);
            ranks.push(MIN_DRAW_RANK);
        }
        Self { ranks, position: 0 }
    }
}

impl RankSource for ScriptedRankSource {
    fn draw_next_rank(&mut self) -> Rank {
        let rank = self.ranks[self.position];
        self.position = (self.position + 1) % self.ranks.len();
        rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_source_stays_in_draw_range() {
        let mut source = RandomRankSource::new(7);
        let mut seen = [false; MAX_DRAW_RANK as usize + 1];
        for _ in 0..300 {
            let rank = source.draw_next_rank();
            assert!((MIN_DRAW_RANK..=MAX_DRAW_RANK).contains(&rank));
            seen[rank as usize] = true;
        }
        assert!(seen[1] && seen[2] && seen[3]);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomRankSource::new(42);
        let mut b = RandomRankSource::new(42);
        for _ in 0..32 {
            assert_eq!(a.draw_next_rank(), b.draw_next_rank());
        }
    }

    #[test]
    fn scripted_source_cycles() {
        let mut source = ScriptedRankSource::new(&[2, 3]);
        assert_eq!(source.draw_next_rank(), 2);
        assert_eq!(source.draw_next_rank(), 3);
        assert_eq!(source.draw_next_rank(), 2);
    }

    #[test]
    fn out_of_range_draws_are_clamped() {
        let mut source = ScriptedRankSource::new(&[0, 9]);
        assert_eq!(draw_next_tile(&mut source).rank(), MIN_DRAW_RANK);
        assert_eq!(draw_next_tile(&mut source).rank(), MAX_DRAW_RANK);
    }
}
