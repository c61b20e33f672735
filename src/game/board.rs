use tracing::{debug, trace, warn};

use crate::error::ConfigError;

use super::player::Player;

/// Boards larger than this on either axis get a size warning at construction.
pub const LARGE_BOARD_LIMIT: usize = 20;

/// Scan directions for line counting: horizontal, vertical, diagonal ↘,
/// diagonal ↙. Every maximal run is counted once per direction family.
const LINE_DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A single board position: empty, or holding one player's counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Counter(Player),
}

/// Errors from applying a move to the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {column} is out of range for a board with {cols} columns")]
    InvalidColumn { column: usize, cols: usize },
}

/// The Connect-X grid: counters dropped into columns stack upward from the
/// bottom row under gravity.
///
/// Cells are stored row-major with row 0 at the top. `Clone` produces a full
/// deep copy, so simulated continuations never share state with the live
/// board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    win_condition: usize,
    cells: Vec<Cell>,
    column_heights: Vec<usize>,
}

impl Board {
    /// Create an empty board.
    ///
    /// Fails if either dimension or the win condition is zero, or if the win
    /// condition exceeds the smaller dimension (line detection would be
    /// ill-defined). Oversized boards are allowed but draw a warning.
    pub fn new(rows: usize, cols: usize, win_condition: usize) -> Result<Board, ConfigError> {
        if rows == 0 {
            return Err(ConfigError::Validation("rows must be > 0".into()));
        }
        if cols == 0 {
            return Err(ConfigError::Validation("cols must be > 0".into()));
        }
        if win_condition == 0 {
            return Err(ConfigError::Validation("win_condition must be > 0".into()));
        }
        if win_condition > rows.min(cols) {
            return Err(ConfigError::Validation(format!(
                "win_condition {win_condition} exceeds the smaller dimension of a {rows}x{cols} board"
            )));
        }
        if rows > LARGE_BOARD_LIMIT || cols > LARGE_BOARD_LIMIT {
            warn!(rows, cols, "board size is quite large, consider making it smaller");
        }

        Ok(Board {
            rows,
            cols,
            win_condition,
            cells: vec![Cell::Empty; rows * cols],
            column_heights: vec![0; cols],
        })
    }

    /// The conventional 6x7 board requiring four in a row.
    pub fn standard() -> Board {
        Board::new(6, 7, 4).expect("standard dimensions are valid")
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn win_condition(&self) -> usize {
        self.win_condition
    }

    /// Total number of cells, i.e. the maximum number of moves in a game.
    pub fn max_moves(&self) -> usize {
        self.rows * self.cols
    }

    /// Get the cell at a specific position.
    /// Row 0 is the top, row `rows - 1` is the bottom.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// All cells in row-major order, row 0 first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of counters currently stacked in a column.
    pub fn column_height(&self, col: usize) -> usize {
        self.column_heights[col]
    }

    /// Per-column counter heights, indexed by column.
    pub fn column_heights(&self) -> &[usize] {
        &self.column_heights
    }

    /// Check if a column is full. Out-of-range columns report full, i.e.
    /// unusable.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return true;
        }
        self.column_heights[col] == self.rows
    }

    /// Check if the board is completely full.
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| self.is_column_full(col))
    }

    /// Drop a player's counter into a column, returning the row it landed on.
    pub fn drop_counter(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn {
                column: col,
                cols: self.cols,
            });
        }
        if self.column_heights[col] == self.rows {
            return Err(MoveError::ColumnFull(col));
        }

        // Counters stack upward, so the landing row follows directly from the
        // column height.
        let row = self.rows - self.column_heights[col] - 1;
        self.cells[row * self.cols + col] = player.to_cell();
        self.column_heights[col] += 1;

        debug!(player = player.number(), column = col, row, "counter dropped");
        Ok(row)
    }

    /// Count maximal runs of at least `length` consecutive counters belonging
    /// to `player`, over all four scan directions.
    ///
    /// Each maximal run contributes once per direction family regardless of
    /// how far it extends past `length`: a streak of 5 queried at length 4
    /// counts once, not twice. A `length` of 0 counts nothing.
    pub fn count_lines(&self, player: Player, length: usize) -> usize {
        if length == 0 {
            return 0;
        }

        let owned = player.to_cell();
        let mut total = 0;
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.cell(row, col) != owned {
                    continue;
                }
                for (dr, dc) in LINE_DIRECTIONS {
                    // Only the first counter of a run starts a count; cells
                    // preceded by a same-owner cell are mid-run.
                    if self.cell_at(row as isize - dr, col as isize - dc) == Some(owned) {
                        continue;
                    }
                    let mut run = 1;
                    let mut r = row as isize + dr;
                    let mut c = col as isize + dc;
                    while self.cell_at(r, c) == Some(owned) {
                        run += 1;
                        r += dr;
                        c += dc;
                    }
                    if run >= length {
                        total += 1;
                    }
                }
            }
        }

        trace!(player = player.number(), length, lines = total, "counted lines");
        total
    }

    /// Whether the player has completed at least one winning line.
    pub fn has_won(&self, player: Player) -> bool {
        self.count_lines(player, self.win_condition) > 0
    }

    /// Clear all counters, keeping dimensions and win condition, so the board
    /// can be reused for another game.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.column_heights.fill(0);
        debug!("board reset");
    }

    /// Flat state encoding for observation vectors: every cell's counter
    /// value (0.0 empty, 1.0, 2.0) in row-major order, followed by the
    /// per-column heights.
    pub fn observation(&self) -> Vec<f32> {
        let mut obs = Vec::with_capacity(self.max_moves() + self.cols);
        obs.extend(self.cells.iter().map(|cell| match cell {
            Cell::Empty => 0.0,
            Cell::Counter(p) => f32::from(p.number()),
        }));
        obs.extend(self.column_heights.iter().map(|&h| h as f32));
        obs
    }

    /// Cell at signed coordinates, or `None` when out of bounds.
    fn cell_at(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 || row >= self.rows as isize || col >= self.cols as isize {
            return None;
        }
        Some(self.cells[row as usize * self.cols + col as usize])
    }
}
