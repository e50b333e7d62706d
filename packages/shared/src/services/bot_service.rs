use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::chess::{Board, Side, BOARD_SIZE};
use crate::services::chess_service::ChessService;

/// Randomized-legal move selection: no search, no evaluation.
pub struct BotService;

impl BotService {
    /// Shuffle the side's pieces; the first piece with any legal destination
    /// moves to a uniformly random one. `None` only when no piece on the
    /// side can move at all.
    pub fn select_move<R: Rng>(
        board: &Board,
        side: Side,
        rng: &mut R,
    ) -> Option<((usize, usize), (usize, usize))> {
        let mut pieces: Vec<(usize, usize)> = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if board[row][col].is_some_and(|piece| piece.side == side) {
                    pieces.push((row, col));
                }
            }
        }
        pieces.shuffle(rng);

        for from in pieces {
            let destinations = ChessService::legal_destinations(board, from);
            if let Some(&to) = destinations.choose(rng) {
                return Some((from, to));
            }
        }
        None
    }
}
