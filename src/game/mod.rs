//! Core Connect-X game logic: the gravity-drop board, players, and the
//! line-counting queries that decide wins.

mod board;
mod player;

pub use board::{Board, Cell, MoveError, LARGE_BOARD_LIMIT};
pub use player::Player;
