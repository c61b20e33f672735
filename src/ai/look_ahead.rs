use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::warn;

use crate::error::ConfigError;
use crate::game::{Board, Player};

use super::agent::Agent;

/// Reward assigned to trying a full column. Low enough that any branch with
/// a legal continuation beats any branch without one.
const FULL_COLUMN_PENALTY: f64 = -1e100;

/// Weight applied to the opponent's best reply before it is subtracted from
/// a branch's running reward. Values above 1 bias the agent toward denying
/// strong responses over building its own lines.
const DEFENSIVENESS: f64 = 1.5;

/// Look-ahead depth used when no explicit step count is configured.
pub const DEFAULT_STEPS: usize = 4;

/// Depths above this are accepted but draw a warning at construction.
pub const DEEP_SEARCH_LIMIT: usize = 10;

/// Trait for evaluating a board position from one player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, player: Player) -> f64;
}

/// Default heuristic that rewards lines of connected counters, with a curve
/// steep enough that one completed win line outweighs any achievable sum of
/// partial lines.
pub struct LineScoreHeuristic;

impl Heuristic for LineScoreHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> f64 {
        let win = board.win_condition();
        let mut reward = 0.0;
        for length in 2..win {
            reward += board.count_lines(player, length) as f64 * (length as f64).powi(3);
        }
        reward + board.count_lines(player, win) as f64 * (win as f64).powi(10)
    }
}

/// Agent that explores a bounded-depth adversarial game tree and picks the
/// column whose continuation accumulates the highest heuristic reward,
/// discounted by the opponent's best reply at each level.
///
/// Both the agent's and the opponent's turns branch over every column, so
/// cost grows as `O(cols^(2 * steps))`; treat `steps > 6` as impractical on
/// boards with seven or more columns. The search is stateless across turns.
pub struct LookAheadAgent {
    player: Player,
    steps: usize,
    heuristic: Box<dyn Heuristic>,
    rng: StdRng,
}

impl LookAheadAgent {
    pub fn new(player: Player, steps: usize) -> Result<Self, ConfigError> {
        Self::with_heuristic(player, steps, Box::new(LineScoreHeuristic))
    }

    /// Deterministic variant for reproducible runs; ties still break
    /// randomly but follow the seeded stream.
    pub fn seeded(player: Player, steps: usize, seed: u64) -> Result<Self, ConfigError> {
        Self::build(
            player,
            steps,
            Box::new(LineScoreHeuristic),
            StdRng::seed_from_u64(seed),
        )
    }

    pub fn with_heuristic(
        player: Player,
        steps: usize,
        heuristic: Box<dyn Heuristic>,
    ) -> Result<Self, ConfigError> {
        Self::build(player, steps, heuristic, StdRng::from_os_rng())
    }

    fn build(
        player: Player,
        steps: usize,
        heuristic: Box<dyn Heuristic>,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        if steps == 0 {
            return Err(ConfigError::Validation(
                "look-ahead steps must be >= 1".into(),
            ));
        }
        if steps > DEEP_SEARCH_LIMIT {
            warn!(steps, "look-ahead depth is very deep, each turn may take a long time");
        }
        Ok(LookAheadAgent {
            player,
            steps,
            heuristic,
            rng,
        })
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    fn best_move(&mut self, board: &Board) -> usize {
        let mut rewards = Vec::with_capacity(board.cols());
        for col in 0..board.cols() {
            rewards.push(self.explore(board, col, 0.0, self.steps));
        }
        self.pick_best(&rewards)
    }

    /// Evaluates one branch: try `col`, charge the opponent's best reply,
    /// then recurse over every follow-up column. Returns the best cumulative
    /// reward over all leaves beneath the branch.
    fn explore(&mut self, board: &Board, col: usize, acc: f64, remaining: usize) -> f64 {
        let mut sim = board.clone();
        let mut total = acc + self.try_drop(&mut sim, col, self.player);

        if remaining <= 1 {
            return total;
        }

        let (reply, reply_reward) = self.best_response(&sim);
        total -= reply_reward * DEFENSIVENESS;
        if !sim.is_column_full(reply) {
            sim.drop_counter(reply, self.player.other())
                .expect("column is not full");
        }

        let mut best = f64::NEG_INFINITY;
        for next in 0..sim.cols() {
            let branch = self.explore(&sim, next, total, remaining - 1);
            if branch > best {
                best = branch;
            }
        }
        best
    }

    /// Applies `col` for `player` on the simulation board and scores the
    /// result. Full columns keep the board untouched and score the flat
    /// penalty, so the candidate set never needs special-casing.
    fn try_drop(&self, sim: &mut Board, col: usize, player: Player) -> f64 {
        if sim.is_column_full(col) {
            return FULL_COLUMN_PENALTY;
        }
        sim.drop_counter(col, player).expect("column is not full");
        self.heuristic.evaluate(sim, player)
    }

    /// The opponent's best immediate reply under the same heuristic,
    /// evaluated for the opponent's own identity.
    fn best_response(&mut self, board: &Board) -> (usize, f64) {
        let opponent = self.player.other();
        let mut rewards = Vec::with_capacity(board.cols());
        for col in 0..board.cols() {
            let mut sim = board.clone();
            rewards.push(self.try_drop(&mut sim, col, opponent));
        }
        let col = self.pick_best(&rewards);
        (col, rewards[col])
    }

    /// Index of the maximum reward; exact ties break uniformly at random so
    /// the agent never becomes predictable on symmetric positions.
    fn pick_best(&mut self, rewards: &[f64]) -> usize {
        let best = rewards.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let tied: Vec<usize> = (0..rewards.len())
            .filter(|&col| rewards[col] == best)
            .collect();
        tied[self.rng.random_range(0..tied.len())]
    }
}

impl Agent for LookAheadAgent {
    fn choose_column(&mut self, board: &Board) -> usize {
        self.best_move(board)
    }

    fn name(&self) -> &str {
        "LookAhead"
    }

    fn player(&self) -> Player {
        self.player
    }
}
