//! # Connect-X
//!
//! Core library for Connect-X, the generalisation of Connect Four to any
//! board size and win-line length. Provides the board engine (gravity drops,
//! exact line counting, win detection) and a family of search agents behind
//! one polymorphic trait. Rendering, CLI handling, and model-backed policies
//! are left to downstream crates, which drive the same `Board` and `Agent`
//! APIs.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, cells, players, line counting
//! - [`ai`] — Agent trait plus the random, minimum, and look-ahead agents
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
