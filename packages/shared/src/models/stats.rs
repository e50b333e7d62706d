use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const BASELINE_RATING: i32 = 1200;
pub const RATING_FLOOR: i32 = 800;
pub const RATING_CEILING: i32 = 2800;

/// Per-user aggregate ledger entry. Mutated only through the rating service
/// transformation; counters never decrease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub user_id: String,
    pub chess_wins: u32,
    pub chess_losses: u32,
    pub chess_draws: u32,
    pub chess_total_games: u32,
    pub chess_bot_wins: u32,
    pub chess_pvp_wins: u32,
    pub sudoku_wins: u32,
    pub sudoku_losses: u32,
    pub sudoku_total_games: u32,
    pub sudoku_bot_wins: u32,
    pub sudoku_pvp_wins: u32,
    pub total_points: i64,
    pub rating: i32,
    pub highest_rating: i32,
    /// Optimistic concurrency token; incremented on every committed mutation.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GameStats {
    pub fn baseline(user_id: &str) -> Self {
        let now = Utc::now();
        GameStats {
            user_id: user_id.to_string(),
            chess_wins: 0,
            chess_losses: 0,
            chess_draws: 0,
            chess_total_games: 0,
            chess_bot_wins: 0,
            chess_pvp_wins: 0,
            sudoku_wins: 0,
            sudoku_losses: 0,
            sudoku_total_games: 0,
            sudoku_bot_wins: 0,
            sudoku_pvp_wins: 0,
            total_points: 0,
            rating: BASELINE_RATING,
            highest_rating: BASELINE_RATING,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn total_wins(&self) -> u32 {
        self.chess_wins + self.sudoku_wins
    }

    pub fn total_losses(&self) -> u32 {
        self.chess_losses + self.sudoku_losses
    }

    pub fn total_games_played(&self) -> u32 {
        self.chess_total_games + self.sudoku_total_games
    }

    pub fn win_percentage(&self) -> f64 {
        win_percentage(self.total_wins(), self.total_games_played())
    }

    /// Weighted recomputation of the points column. The stored `total_points`
    /// (incremental deltas) is ground truth; this projection exists for
    /// read-time consistency checks against it.
    pub fn projected_points(&self) -> i64 {
        25 * self.chess_wins as i64
            + 10 * self.chess_draws as i64
            + 30 * self.sudoku_wins as i64
            + 15 * self.chess_pvp_wins as i64
            + 20 * self.sudoku_pvp_wins as i64
            + (((self.rating - BASELINE_RATING) / 10).max(0)) as i64
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            user_id: self.user_id.clone(),
            chess_wins: self.chess_wins,
            chess_losses: self.chess_losses,
            chess_draws: self.chess_draws,
            chess_total_games: self.chess_total_games,
            sudoku_wins: self.sudoku_wins,
            sudoku_losses: self.sudoku_losses,
            sudoku_total_games: self.sudoku_total_games,
            total_points: self.total_points,
            rating: self.rating,
            highest_rating: self.highest_rating,
            total_wins: self.total_wins(),
            total_games_played: self.total_games_played(),
            win_percentage: self.win_percentage(),
        }
    }
}

/// Stats entry plus the derived fields the stats endpoint reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSummary {
    pub user_id: String,
    pub chess_wins: u32,
    pub chess_losses: u32,
    pub chess_draws: u32,
    pub chess_total_games: u32,
    pub sudoku_wins: u32,
    pub sudoku_losses: u32,
    pub sudoku_total_games: u32,
    pub total_points: i64,
    pub rating: i32,
    pub highest_rating: i32,
    pub total_wins: u32,
    pub total_games_played: u32,
    pub win_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_games: u32,
    pub total_points: i64,
    pub rating: i32,
    pub highest_rating: i32,
    pub rank: usize,
    pub win_percentage: f64,
}

/// Percentage of games won, rounded to two decimals.
pub fn win_percentage(wins: u32, total_games: u32) -> f64 {
    if total_games == 0 {
        return 0.0;
    }
    (wins as f64 / total_games as f64 * 100.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_values() {
        let stats = GameStats::baseline("user-1");

        assert_eq!(stats.user_id, "user-1");
        assert_eq!(stats.rating, BASELINE_RATING);
        assert_eq!(stats.highest_rating, BASELINE_RATING);
        assert_eq!(stats.total_points, 0);
        assert_eq!(stats.total_games_played(), 0);
        assert_eq!(stats.version, 1);
    }

    #[test]
    fn test_win_percentage_rounding() {
        assert_eq!(win_percentage(0, 0), 0.0);
        assert_eq!(win_percentage(1, 3), 33.33);
        assert_eq!(win_percentage(2, 3), 66.67);
        assert_eq!(win_percentage(5, 5), 100.0);
    }

    #[test]
    fn test_projected_points_formula() {
        let mut stats = GameStats::baseline("user-1");
        stats.chess_wins = 2;
        stats.chess_draws = 1;
        stats.sudoku_wins = 1;
        stats.chess_pvp_wins = 1;
        stats.rating = 1250;

        // 2*25 + 1*10 + 1*30 + 1*15 + (1250-1200)/10
        assert_eq!(stats.projected_points(), 50 + 10 + 30 + 15 + 5);
    }

    #[test]
    fn test_projected_points_rating_term_floors_at_zero() {
        let mut stats = GameStats::baseline("user-1");
        stats.rating = 900;

        assert_eq!(stats.projected_points(), 0);
    }

    #[test]
    fn test_summary_derived_fields() {
        let mut stats = GameStats::baseline("user-1");
        stats.chess_wins = 3;
        stats.chess_losses = 1;
        stats.chess_total_games = 4;
        stats.sudoku_wins = 1;
        stats.sudoku_total_games = 2;

        let summary = stats.summary();

        assert_eq!(summary.total_wins, 4);
        assert_eq!(summary.total_games_played, 6);
        assert_eq!(summary.win_percentage, 66.67);
    }
}
