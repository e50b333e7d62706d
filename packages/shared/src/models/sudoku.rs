use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const GRID_SIZE: usize = 9;

/// 9x9 digit grid; zero marks a blank cell.
pub type Grid = [[u8; GRID_SIZE]; GRID_SIZE];

pub const STARTING_HINTS: u8 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SudokuState {
    pub puzzle: Grid,
    pub solution: Grid,
    pub user_input: Grid,
    /// Cells whose current value disagrees with the solution.
    pub conflicts: BTreeSet<(u8, u8)>,
    pub hints: u8,
    pub started_at: DateTime<Utc>,
    pub is_completed: bool,
}

impl SudokuState {
    pub fn from_puzzle(puzzle: Grid, solution: Grid) -> Self {
        SudokuState {
            puzzle,
            solution,
            user_input: puzzle,
            conflicts: BTreeSet::new(),
            hints: STARTING_HINTS,
            started_at: Utc::now(),
            is_completed: false,
        }
    }
}
