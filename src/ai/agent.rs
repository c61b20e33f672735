use crate::game::{Board, Player};

/// Universal interface for anything that can take a turn: pick a column given
/// the current board.
///
/// Agents never mutate the live board; the driving game loop applies the
/// returned move and detects game end. Columns are 0-indexed — translating to
/// a 1-indexed user-facing form is the driver's concern. Implementations must
/// only be asked to move while at least one column is legal.
pub trait Agent {
    /// Select the column to drop a counter into.
    fn choose_column(&mut self, board: &Board) -> usize;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// The player identity this agent plays as.
    fn player(&self) -> Player;
}
