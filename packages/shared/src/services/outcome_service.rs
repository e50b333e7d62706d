use crate::models::chess::{ChessState, Side};
use crate::models::game::{GameEnd, GameState, PlayerOutcome};
use crate::models::sudoku::SudokuState;
use crate::services::chess_service::ChessService;
use crate::services::sudoku_service::SudokuService;

/// Decides whether a game has reached a terminal state after a move. The
/// owner always plays White in chess; outcomes are from their perspective.
pub struct OutcomeService;

impl OutcomeService {
    pub fn resolve(state: &GameState) -> GameEnd {
        match state {
            GameState::Chess(chess) => Self::resolve_chess(chess),
            GameState::Sudoku(sudoku) => Self::resolve_sudoku(sudoku),
        }
    }

    /// King capture ends the game; there is no other chess terminal state
    /// short of resignation.
    pub fn resolve_chess(state: &ChessState) -> GameEnd {
        if !ChessService::king_present(&state.board, Side::Black) {
            return GameEnd::ended(PlayerOutcome::Win);
        }
        if !ChessService::king_present(&state.board, Side::White) {
            return GameEnd::ended(PlayerOutcome::Loss);
        }
        GameEnd::continuing()
    }

    /// Sudoku is won when solved; it has no loss short of resignation.
    pub fn resolve_sudoku(state: &SudokuState) -> GameEnd {
        if SudokuService::is_complete(state) {
            GameEnd::ended(PlayerOutcome::Win)
        } else {
            GameEnd::continuing()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chess::ChessState;
    use rstest::rstest;

    #[test]
    fn test_fresh_chess_game_continues() {
        let state = ChessState::new();

        let end = OutcomeService::resolve_chess(&state);

        assert!(!end.is_end);
        assert!(end.result.is_none());
    }

    #[rstest]
    #[case([0, 4], PlayerOutcome::Win)]
    #[case([7, 4], PlayerOutcome::Loss)]
    fn test_missing_king_ends_the_game(
        #[case] king_square: [usize; 2],
        #[case] expected: PlayerOutcome,
    ) {
        let mut state = ChessState::new();
        state.board[king_square[0]][king_square[1]] = None;

        let end = OutcomeService::resolve_chess(&state);

        assert_eq!(end, GameEnd::ended(expected));
    }

    #[test]
    fn test_solved_sudoku_is_a_win() {
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        let mut state = SudokuService::generate(&mut rng);

        assert!(!OutcomeService::resolve_sudoku(&state).is_end);

        state.user_input = state.solution;
        assert_eq!(
            OutcomeService::resolve_sudoku(&state),
            GameEnd::ended(PlayerOutcome::Win)
        );
    }
}
