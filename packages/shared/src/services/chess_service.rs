use chrono::Utc;

use crate::models::chess::{
    Board, ChessState, MoveHistoryEntry, Piece, PieceKind, Side, BOARD_SIZE,
};
use crate::services::errors::chess_service_errors::ChessServiceError;

/// Simplified piece-movement rules: per-piece geometry plus path blocking,
/// no castling, en-passant, promotion, or check detection. A move can leave
/// the mover's own king capturable; games end by king capture instead.
pub struct ChessService;

#[derive(Debug, Clone, Copy)]
pub struct AppliedMove {
    pub piece: Piece,
    pub captured: Option<Piece>,
}

impl ChessService {
    /// Pure legality check for moving `piece` from `from` to `to`.
    pub fn is_legal(board: &Board, from: (usize, usize), to: (usize, usize), piece: Piece) -> bool {
        if to.0 >= BOARD_SIZE || to.1 >= BOARD_SIZE {
            return false;
        }

        let target = board[to.0][to.1];
        if let Some(target) = target {
            if target.side == piece.side {
                return false;
            }
        }

        let row_diff = to.0.abs_diff(from.0);
        let col_diff = to.1.abs_diff(from.1);

        match piece.kind {
            PieceKind::Pawn => {
                let (direction, start_row): (isize, usize) = match piece.side {
                    Side::White => (-1, 6),
                    Side::Black => (1, 1),
                };
                let one_step = from.0 as isize + direction;
                if col_diff == 0 && target.is_none() {
                    if to.0 as isize == one_step {
                        return true;
                    }
                    if from.0 == start_row && to.0 as isize == from.0 as isize + 2 * direction {
                        return true;
                    }
                }
                // Diagonal steps only capture.
                col_diff == 1 && to.0 as isize == one_step && target.is_some()
            }
            PieceKind::Rook => {
                (row_diff == 0 || col_diff == 0) && Self::path_clear(board, from, to)
            }
            PieceKind::Knight => {
                (row_diff == 2 && col_diff == 1) || (row_diff == 1 && col_diff == 2)
            }
            PieceKind::Bishop => row_diff == col_diff && Self::path_clear(board, from, to),
            PieceKind::Queen => {
                (row_diff == 0 || col_diff == 0 || row_diff == col_diff)
                    && Self::path_clear(board, from, to)
            }
            PieceKind::King => row_diff <= 1 && col_diff <= 1,
        }
    }

    /// Scans the straight line between `from` and `to`, exclusive of both
    /// endpoints. Callers guarantee the squares share a rank, file, or
    /// diagonal.
    pub fn path_clear(board: &Board, from: (usize, usize), to: (usize, usize)) -> bool {
        let row_dir = (to.0 as isize - from.0 as isize).signum();
        let col_dir = (to.1 as isize - from.1 as isize).signum();

        let mut row = from.0 as isize + row_dir;
        let mut col = from.1 as isize + col_dir;
        while (row, col) != (to.0 as isize, to.1 as isize) {
            if board[row as usize][col as usize].is_some() {
                return false;
            }
            row += row_dir;
            col += col_dir;
        }
        true
    }

    pub fn legal_destinations(board: &Board, from: (usize, usize)) -> Vec<(usize, usize)> {
        let mut destinations = Vec::new();
        if let Some(piece) = board[from.0][from.1] {
            for row in 0..BOARD_SIZE {
                for col in 0..BOARD_SIZE {
                    if Self::is_legal(board, from, (row, col), piece) {
                        destinations.push((row, col));
                    }
                }
            }
        }
        destinations
    }

    pub fn king_present(board: &Board, side: Side) -> bool {
        board
            .iter()
            .flatten()
            .flatten()
            .any(|piece| piece.kind == PieceKind::King && piece.side == side)
    }

    /// Validate and apply a move for the side to move. Relocates the piece,
    /// records any capture on the capturer's list, appends to the move
    /// history, and toggles the side to move.
    pub fn apply_move(
        state: &mut ChessState,
        from: (usize, usize),
        to: (usize, usize),
    ) -> Result<AppliedMove, ChessServiceError> {
        if from.0 >= BOARD_SIZE || from.1 >= BOARD_SIZE || to.0 >= BOARD_SIZE || to.1 >= BOARD_SIZE
        {
            return Err(ChessServiceError::IllegalMove(
                "square is off the board".to_string(),
            ));
        }

        let piece = state.board[from.0][from.1].ok_or_else(|| {
            ChessServiceError::IllegalMove("no piece on the source square".to_string())
        })?;
        if piece.side != state.side_to_move {
            return Err(ChessServiceError::NotYourTurn);
        }
        if !Self::is_legal(&state.board, from, to, piece) {
            return Err(ChessServiceError::IllegalMove(format!(
                "{:?} cannot move from {:?} to {:?}",
                piece.kind, from, to
            )));
        }

        let captured = state.board[to.0][to.1];
        state.board[to.0][to.1] = Some(piece);
        state.board[from.0][from.1] = None;

        if let Some(captured) = captured {
            match captured.side {
                Side::White => state.captured_pieces.black.push(captured),
                Side::Black => state.captured_pieces.white.push(captured),
            }
        }

        state.move_history.push(MoveHistoryEntry {
            from: [from.0, from.1],
            to: [to.0, to.1],
            piece,
            captured,
            timestamp: Utc::now(),
        });
        state.side_to_move = state.side_to_move.opponent();

        Ok(AppliedMove { piece, captured })
    }
}
