use std::sync::Arc;

use crate::models::game::GameType;
use crate::models::stats::{win_percentage, GameStats, LeaderboardEntry};
use crate::repositories::errors::stats_repository_errors::StatsRepositoryError;
use crate::repositories::stats_repository::StatsRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::stats_service_errors::StatsServiceError;

pub const DEFAULT_LEADERBOARD_LIMIT: usize = 50;

/// Read side of the ledger: per-user stats lookups and the leaderboard
/// projection. Reads only committed entries; never applies outcomes itself.
pub struct StatsService {
    stats: Arc<dyn StatsRepository + Send + Sync>,
    users: Arc<dyn UserRepository + Send + Sync>,
}

impl StatsService {
    pub fn new(
        stats: Arc<dyn StatsRepository + Send + Sync>,
        users: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        StatsService { stats, users }
    }

    pub async fn get_or_create_stats(
        &self,
        user_id: &str,
    ) -> Result<GameStats, StatsServiceError> {
        if user_id.is_empty() {
            return Err(StatsServiceError::ValidationError(
                "User ID cannot be empty".to_string(),
            ));
        }
        if let Some(stats) = self.stats.get_stats(user_id).await? {
            return Ok(stats);
        }
        let baseline = GameStats::baseline(user_id);
        match self.stats.create_stats(&baseline).await {
            Ok(()) => Ok(baseline),
            Err(StatsRepositoryError::AlreadyExists) => self
                .stats
                .get_stats(user_id)
                .await?
                .ok_or_else(|| {
                    StatsServiceError::RepositoryError(
                        "Stats entry vanished after concurrent create".to_string(),
                    )
                }),
            Err(e) => Err(e.into()),
        }
    }

    /// Users ranked by total points, tie-broken by rating then highest
    /// rating; restricted to users with at least one game of the relevant
    /// type and positive points. Rank is assigned at read time.
    pub async fn leaderboard(
        &self,
        filter: Option<GameType>,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, StatsServiceError> {
        let mut rows = self.stats.scan_stats().await?;
        rows.retain(|stats| {
            stats.total_points > 0
                && match filter {
                    Some(GameType::Chess) => stats.chess_total_games > 0,
                    Some(GameType::Sudoku) => stats.sudoku_total_games > 0,
                    None => stats.total_games_played() > 0,
                }
        });
        rows.sort_by(|a, b| {
            b.total_points
                .cmp(&a.total_points)
                .then(b.rating.cmp(&a.rating))
                .then(b.highest_rating.cmp(&a.highest_rating))
        });
        rows.truncate(limit);

        let mut entries = Vec::with_capacity(rows.len());
        for stats in rows {
            // Entries without a user record are dropped rather than ranked.
            let Some(profile) = self.users.get_profile(&stats.user_id).await? else {
                continue;
            };
            let (wins, losses, draws, total_games) = match filter {
                Some(GameType::Chess) => (
                    stats.chess_wins,
                    stats.chess_losses,
                    stats.chess_draws,
                    stats.chess_total_games,
                ),
                Some(GameType::Sudoku) => (
                    stats.sudoku_wins,
                    stats.sudoku_losses,
                    0,
                    stats.sudoku_total_games,
                ),
                None => (
                    stats.total_wins(),
                    stats.total_losses(),
                    stats.chess_draws,
                    stats.total_games_played(),
                ),
            };
            entries.push(LeaderboardEntry {
                id: profile.id,
                username: profile.username,
                avatar: profile.avatar,
                wins,
                losses,
                draws,
                total_games,
                total_points: stats.total_points,
                rating: stats.rating,
                highest_rating: stats.highest_rating,
                rank: entries.len() + 1,
                win_percentage: win_percentage(wins, total_games),
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserProfile;
    use crate::repositories::stats_repository::MockStatsRepository;
    use crate::repositories::user_repository::MockUserRepository;

    fn entry(user_id: &str, points: i64, rating: i32, chess_games: u32, sudoku_games: u32) -> GameStats {
        let mut stats = GameStats::baseline(user_id);
        stats.total_points = points;
        stats.rating = rating;
        stats.highest_rating = rating.max(1200);
        stats.chess_total_games = chess_games;
        stats.chess_wins = chess_games;
        stats.sudoku_total_games = sudoku_games;
        stats.sudoku_wins = sudoku_games;
        stats
    }

    fn profile_repo() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_get_profile().returning(|user_id| {
            Ok(Some(UserProfile {
                id: user_id.to_string(),
                username: format!("name-{}", user_id),
                avatar: None,
            }))
        });
        users
    }

    #[tokio::test]
    async fn test_leaderboard_orders_by_points_then_rating() {
        let mut stats = MockStatsRepository::new();
        stats.expect_scan_stats().returning(|| {
            Ok(vec![
                entry("low", 10, 1200, 1, 0),
                entry("high", 90, 1230, 3, 0),
                entry("mid-weak", 50, 1210, 2, 0),
                entry("mid-strong", 50, 1240, 2, 0),
            ])
        });
        let service = StatsService::new(Arc::new(stats), Arc::new(profile_repo()));

        let board = service.leaderboard(None, 50).await.unwrap();

        let ids: Vec<&str> = board.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid-strong", "mid-weak", "low"]);
        let ranks: Vec<usize> = board.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_leaderboard_excludes_zero_point_and_unplayed_users() {
        let mut stats = MockStatsRepository::new();
        stats.expect_scan_stats().returning(|| {
            Ok(vec![
                entry("no-points", 0, 1200, 2, 0),
                entry("no-games", 40, 1215, 0, 0),
                entry("played", 25, 1215, 1, 0),
            ])
        });
        let service = StatsService::new(Arc::new(stats), Arc::new(profile_repo()));

        let board = service.leaderboard(None, 50).await.unwrap();

        assert_eq!(board.len(), 1);
        assert_eq!(board[0].id, "played");
    }

    #[tokio::test]
    async fn test_leaderboard_type_filter_uses_type_counters() {
        let mut stats = MockStatsRepository::new();
        stats.expect_scan_stats().returning(|| {
            Ok(vec![
                entry("chess-only", 50, 1230, 2, 0),
                entry("sudoku-only", 60, 1230, 0, 2),
            ])
        });
        let service = StatsService::new(Arc::new(stats), Arc::new(profile_repo()));

        let board = service.leaderboard(Some(GameType::Sudoku), 50).await.unwrap();

        assert_eq!(board.len(), 1);
        assert_eq!(board[0].id, "sudoku-only");
        assert_eq!(board[0].wins, 2);
        assert_eq!(board[0].draws, 0);
        assert_eq!(board[0].win_percentage, 100.0);
    }

    #[tokio::test]
    async fn test_leaderboard_respects_limit() {
        let mut stats = MockStatsRepository::new();
        stats.expect_scan_stats().returning(|| {
            Ok((0..10)
                .map(|i| entry(&format!("user-{}", i), 100 - i as i64, 1200, 1, 0))
                .collect())
        });
        let service = StatsService::new(Arc::new(stats), Arc::new(profile_repo()));

        let board = service.leaderboard(None, 3).await.unwrap();

        assert_eq!(board.len(), 3);
        assert_eq!(board[0].id, "user-0");
    }

    #[tokio::test]
    async fn test_leaderboard_skips_users_without_profile() {
        let mut stats = MockStatsRepository::new();
        stats.expect_scan_stats().returning(|| {
            Ok(vec![
                entry("ghost", 90, 1230, 1, 0),
                entry("present", 50, 1210, 1, 0),
            ])
        });
        let mut users = MockUserRepository::new();
        users.expect_get_profile().returning(|user_id| {
            if user_id == "ghost" {
                Ok(None)
            } else {
                Ok(Some(UserProfile {
                    id: user_id.to_string(),
                    username: user_id.to_string(),
                    avatar: None,
                }))
            }
        });
        let service = StatsService::new(Arc::new(stats), Arc::new(users));

        let board = service.leaderboard(None, 50).await.unwrap();

        assert_eq!(board.len(), 1);
        assert_eq!(board[0].id, "present");
        assert_eq!(board[0].rank, 1);
    }

    #[tokio::test]
    async fn test_get_or_create_returns_baseline_for_new_user() {
        let mut stats = MockStatsRepository::new();
        stats.expect_get_stats().returning(|_| Ok(None));
        stats.expect_create_stats().returning(|_| Ok(()));
        let service = StatsService::new(Arc::new(stats), Arc::new(profile_repo()));

        let created = service.get_or_create_stats("user-1").await.unwrap();

        assert_eq!(created.rating, 1200);
        assert_eq!(created.total_games_played(), 0);
    }

    #[tokio::test]
    async fn test_get_or_create_rejects_empty_user() {
        let service = StatsService::new(
            Arc::new(MockStatsRepository::new()),
            Arc::new(profile_repo()),
        );

        let result = service.get_or_create_stats("").await;

        assert!(matches!(result, Err(StatsServiceError::ValidationError(_))));
    }
}
