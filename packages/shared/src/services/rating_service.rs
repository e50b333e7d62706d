use chrono::Utc;

use crate::models::game::{GameMode, GameType, PlayerOutcome};
use crate::models::stats::{GameStats, RATING_CEILING, RATING_FLOOR};

/// Pure ledger transformation; the only code path allowed to change a stats
/// entry. Points and rating move by fixed deltas per outcome.
pub struct RatingService;

impl RatingService {
    pub fn apply_outcome(
        stats: &GameStats,
        game_type: GameType,
        outcome: PlayerOutcome,
        game_mode: GameMode,
    ) -> GameStats {
        let mut next = stats.clone();

        let (points_delta, rating_delta): (i64, i32) = match (game_type, outcome) {
            (GameType::Chess, PlayerOutcome::Win) => (25, 15),
            (GameType::Chess, PlayerOutcome::Draw) => (5, 5),
            (GameType::Chess, PlayerOutcome::Loss) => (-10, -10),
            (GameType::Sudoku, PlayerOutcome::Win) => (30, 15),
            // Sudoku has no draw; nothing produces this combination.
            (GameType::Sudoku, PlayerOutcome::Draw) => (0, 0),
            (GameType::Sudoku, PlayerOutcome::Loss) => (-10, -10),
        };

        match game_type {
            GameType::Chess => {
                next.chess_total_games += 1;
                match outcome {
                    PlayerOutcome::Win => {
                        next.chess_wins += 1;
                        match game_mode {
                            GameMode::Bot => next.chess_bot_wins += 1,
                            GameMode::Pvp => next.chess_pvp_wins += 1,
                        }
                    }
                    PlayerOutcome::Loss => next.chess_losses += 1,
                    PlayerOutcome::Draw => next.chess_draws += 1,
                }
            }
            GameType::Sudoku => {
                next.sudoku_total_games += 1;
                match outcome {
                    PlayerOutcome::Win => {
                        next.sudoku_wins += 1;
                        match game_mode {
                            GameMode::Bot => next.sudoku_bot_wins += 1,
                            GameMode::Pvp => next.sudoku_pvp_wins += 1,
                        }
                    }
                    PlayerOutcome::Loss => next.sudoku_losses += 1,
                    PlayerOutcome::Draw => {}
                }
            }
        }

        next.total_points = (stats.total_points + points_delta).max(0);
        next.rating = (stats.rating + rating_delta).clamp(RATING_FLOOR, RATING_CEILING);
        next.highest_rating = stats.highest_rating.max(next.rating);
        next.updated_at = Utc::now();
        next
    }
}
