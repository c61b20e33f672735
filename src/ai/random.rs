use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::{Board, Player};

use super::agent::Agent;

/// An agent that selects uniformly at random from the non-full columns.
pub struct RandomAgent {
    player: Player,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(player: Player) -> Self {
        RandomAgent {
            player,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic variant for reproducible runs.
    pub fn seeded(player: Player, seed: u64) -> Self {
        RandomAgent {
            player,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn choose_column(&mut self, board: &Board) -> usize {
        let legal: Vec<usize> = (0..board.cols())
            .filter(|&col| !board.is_column_full(col))
            .collect();
        assert!(!legal.is_empty(), "no legal columns available");
        legal[self.rng.random_range(0..legal.len())]
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn player(&self) -> Player {
        self.player
    }
}
