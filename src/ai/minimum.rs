use crate::game::{Board, Player};

use super::agent::Agent;

/// An agent that always drops into the lowest-index non-full column.
///
/// Trivially exploitable, but a useful deterministic baseline.
pub struct MinimumAgent {
    player: Player,
}

impl MinimumAgent {
    pub fn new(player: Player) -> Self {
        MinimumAgent { player }
    }
}

impl Agent for MinimumAgent {
    fn choose_column(&mut self, board: &Board) -> usize {
        (0..board.cols())
            .find(|&col| !board.is_column_full(col))
            .expect("no legal columns available")
    }

    fn name(&self) -> &str {
        "Minimum"
    }

    fn player(&self) -> Player {
        self.player
    }
}
