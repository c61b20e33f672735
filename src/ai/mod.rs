mod agent;
mod look_ahead;
mod minimum;
mod random;

pub use agent::Agent;
pub use look_ahead::{
    Heuristic, LineScoreHeuristic, LookAheadAgent, DEEP_SEARCH_LIMIT, DEFAULT_STEPS,
};
pub use minimum::MinimumAgent;
pub use random::RandomAgent;
