use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::sudoku::{Grid, SudokuState, GRID_SIZE};
use crate::services::errors::sudoku_service_errors::SudokuServiceError;

/// Completion and conflict checks compare against the stored solution grid,
/// not against row/column/box uniqueness.
pub struct SudokuService;

const BASE_SOLUTION: Grid = [
    [5, 3, 4, 6, 7, 8, 9, 1, 2],
    [6, 7, 2, 1, 9, 5, 3, 4, 8],
    [1, 9, 8, 3, 4, 2, 5, 6, 7],
    [8, 5, 9, 7, 6, 1, 4, 2, 3],
    [4, 2, 6, 8, 5, 3, 7, 9, 1],
    [7, 1, 3, 9, 2, 4, 8, 5, 6],
    [9, 6, 1, 5, 3, 7, 2, 8, 4],
    [2, 8, 7, 4, 1, 9, 6, 3, 5],
    [3, 4, 5, 2, 8, 6, 1, 7, 9],
];

/// Number of cell-blanking draws; duplicate draws are allowed, so a puzzle
/// has at most this many blanks.
const BLANK_DRAWS: usize = 40;

impl SudokuService {
    /// Produce a fresh puzzle: the base solution relabeled through a random
    /// digit permutation, with randomly drawn cells blanked out.
    pub fn generate<R: Rng>(rng: &mut R) -> SudokuState {
        let mut relabel: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        relabel.shuffle(rng);

        let mut solution = [[0u8; GRID_SIZE]; GRID_SIZE];
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                solution[row][col] = relabel[(BASE_SOLUTION[row][col] - 1) as usize];
            }
        }

        let mut puzzle = solution;
        for _ in 0..BLANK_DRAWS {
            let row = rng.gen_range(0..GRID_SIZE);
            let col = rng.gen_range(0..GRID_SIZE);
            puzzle[row][col] = 0;
        }

        SudokuState::from_puzzle(puzzle, solution)
    }

    /// Write `value` into a blank-in-the-puzzle cell (0 clears it) and update
    /// the conflict set for that cell. Given cells are immutable.
    pub fn set_cell(
        state: &mut SudokuState,
        row: usize,
        col: usize,
        value: u8,
    ) -> Result<(), SudokuServiceError> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(SudokuServiceError::OutOfBounds);
        }
        if value > 9 {
            return Err(SudokuServiceError::InvalidValue(value));
        }
        if state.puzzle[row][col] != 0 {
            return Err(SudokuServiceError::FixedCell);
        }

        state.user_input[row][col] = value;

        let cell = (row as u8, col as u8);
        if value != 0 && state.solution[row][col] != value {
            state.conflicts.insert(cell);
        } else {
            state.conflicts.remove(&cell);
        }
        Ok(())
    }

    /// True iff every cell of the user input matches the solution.
    pub fn is_complete(state: &SudokuState) -> bool {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if state.user_input[row][col] == 0
                    || state.user_input[row][col] != state.solution[row][col]
                {
                    return false;
                }
            }
        }
        true
    }
}
