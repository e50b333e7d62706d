use std::sync::{Arc, Mutex};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::models::chess::{ChessState, Side};
use crate::models::game::{
    Game, GameEnd, GameResult, GameState, GameStatus, GameType, PlayerOutcome,
};
use crate::models::move_record::{ChessMovePayload, MovePayload, MoveRecord};
use crate::models::stats::GameStats;
use crate::repositories::errors::stats_repository_errors::StatsRepositoryError;
use crate::repositories::game_repository::GameRepository;
use crate::repositories::stats_repository::StatsRepository;
use crate::services::bot_service::BotService;
use crate::services::chess_service::ChessService;
use crate::services::errors::game_service_errors::GameServiceError;
use crate::services::outcome_service::OutcomeService;
use crate::services::rating_service::RatingService;
use crate::services::sudoku_service::SudokuService;

#[derive(Debug, Clone)]
pub struct MoveApplied {
    pub game: Game,
    pub game_ended: GameEnd,
    pub move_id: u64,
}

/// Owns the authoritative per-game record. Every mutation loads a snapshot,
/// derives the next value, and commits it under the snapshot's version token,
/// so concurrent writers to one game serialize instead of losing updates.
pub struct GameService {
    games: Arc<dyn GameRepository + Send + Sync>,
    stats: Arc<dyn StatsRepository + Send + Sync>,
    rng: Mutex<StdRng>,
}

impl GameService {
    pub fn new(
        games: Arc<dyn GameRepository + Send + Sync>,
        stats: Arc<dyn StatsRepository + Send + Sync>,
    ) -> Self {
        GameService {
            games,
            stats,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic variant for tests.
    pub fn with_seed(
        games: Arc<dyn GameRepository + Send + Sync>,
        stats: Arc<dyn StatsRepository + Send + Sync>,
        seed: u64,
    ) -> Self {
        GameService {
            games,
            stats,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub async fn create_game(
        &self,
        user_id: &str,
        game_type: GameType,
    ) -> Result<Game, GameServiceError> {
        if user_id.is_empty() {
            return Err(GameServiceError::ValidationError(
                "User ID cannot be empty".to_string(),
            ));
        }

        self.ensure_stats(user_id).await?;

        let state = match game_type {
            GameType::Chess => GameState::Chess(ChessState::new()),
            GameType::Sudoku => {
                let mut rng = self.rng.lock().expect("rng mutex poisoned");
                GameState::Sudoku(SudokuService::generate(&mut *rng))
            }
        };
        let game = Game::new_bot_game(user_id, state);
        self.games.create_game(&game).await?;

        info!(
            "Created {} bot game {} for user {}",
            game.game_type.as_str(),
            game.game_id,
            user_id
        );
        Ok(game)
    }

    /// Apply one human move as a single atomic unit: engine validation, the
    /// synthesized bot reply for chess, outcome resolution (before and after
    /// the reply), the appended move record, and the stats update when the
    /// game finished. On any failure nothing is persisted.
    pub async fn apply_move(
        &self,
        game_id: &str,
        user_id: &str,
        payload: &MovePayload,
    ) -> Result<MoveApplied, GameServiceError> {
        if game_id.is_empty() || user_id.is_empty() {
            return Err(GameServiceError::ValidationError(
                "Game ID and user ID cannot be empty".to_string(),
            ));
        }

        let game = self.load_playing_game(game_id, user_id).await?;

        let mut next = game.clone();
        let game_ended = match (&mut next.state, payload) {
            (GameState::Chess(state), MovePayload::Chess(mv)) => self.apply_chess_turn(state, mv)?,
            (GameState::Sudoku(state), MovePayload::Sudoku(mv)) => {
                SudokuService::set_cell(state, mv.row, mv.col, mv.value)
                    .map_err(|e| GameServiceError::IllegalMove(e.to_string()))?;
                let end = OutcomeService::resolve_sudoku(state);
                if end.is_end {
                    state.is_completed = true;
                }
                end
            }
            _ => {
                return Err(GameServiceError::ValidationError(
                    "Move payload does not match the game type".to_string(),
                ));
            }
        };

        let now = Utc::now();
        next.updated_at = now;
        next.version = game.version + 1;

        let move_number = self.games.next_move_number(game_id).await?;
        let record = MoveRecord::new(game_id, user_id, move_number, payload.clone());

        let mut updated_stats = None;
        if game_ended.is_end {
            next.status = GameStatus::Finished;
            next.finished_at = Some(now);
            if let Some(outcome) = game_ended.result {
                next.result = Some(stored_result(outcome));
                next.winner_id = match outcome {
                    PlayerOutcome::Win => Some(user_id.to_string()),
                    _ => None,
                };
                updated_stats = Some(self.settle_stats(user_id, &game, outcome).await?);
            }
        }

        self.games
            .commit_turn(&next, game.version, Some(record), updated_stats)
            .await?;

        info!(
            "Applied move {} to game {} (ended: {})",
            move_number, game_id, game_ended.is_end
        );
        Ok(MoveApplied {
            game: next,
            game_ended,
            move_id: move_number,
        })
    }

    /// Resignation unconditionally ends the game as a loss for the resigning
    /// player. The state payload is left as it stood.
    pub async fn resign(&self, game_id: &str, user_id: &str) -> Result<Game, GameServiceError> {
        if game_id.is_empty() || user_id.is_empty() {
            return Err(GameServiceError::ValidationError(
                "Game ID and user ID cannot be empty".to_string(),
            ));
        }

        let game = self.load_playing_game(game_id, user_id).await?;

        let now = Utc::now();
        let mut next = game.clone();
        next.status = GameStatus::Finished;
        next.result = Some(stored_result(PlayerOutcome::Loss));
        next.winner_id = None;
        next.finished_at = Some(now);
        next.updated_at = now;
        next.version = game.version + 1;

        let updated_stats = self.settle_stats(user_id, &game, PlayerOutcome::Loss).await?;

        self.games
            .commit_turn(&next, game.version, None, Some(updated_stats))
            .await?;

        info!("User {} resigned game {}", user_id, game_id);
        Ok(next)
    }

    pub async fn get_game(&self, game_id: &str, user_id: &str) -> Result<Game, GameServiceError> {
        let game = self
            .games
            .get_game(game_id)
            .await?
            .ok_or(GameServiceError::NotFound)?;
        if !game.is_owned_by(user_id) {
            return Err(GameServiceError::NotFound);
        }
        Ok(game)
    }

    pub async fn move_history(
        &self,
        game_id: &str,
        user_id: &str,
    ) -> Result<Vec<MoveRecord>, GameServiceError> {
        // Ownership check first; the move log leaks board state otherwise.
        self.get_game(game_id, user_id).await?;
        self.games
            .list_moves(game_id)
            .await
            .map_err(GameServiceError::from)
    }

    pub async fn active_games(&self, user_id: &str) -> Result<Vec<Game>, GameServiceError> {
        self.games
            .list_active_games(user_id, 10)
            .await
            .map_err(GameServiceError::from)
    }

    pub async fn finished_games(
        &self,
        user_id: &str,
        game_type: Option<GameType>,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Game>, GameServiceError> {
        let mut games = self.games.list_finished_games(user_id).await?;
        if let Some(game_type) = game_type {
            games.retain(|game| game.game_type == game_type);
        }
        games.sort_by(|a, b| b.finished_at.cmp(&a.finished_at));

        let page = page.max(1) as usize;
        let limit = limit as usize;
        let offset = (page - 1) * limit;
        Ok(games.into_iter().skip(offset).take(limit).collect())
    }

    async fn load_playing_game(
        &self,
        game_id: &str,
        user_id: &str,
    ) -> Result<Game, GameServiceError> {
        let game = self
            .games
            .get_game(game_id)
            .await?
            .ok_or(GameServiceError::NotFound)?;
        // Missing, foreign, and finished games are indistinguishable here.
        if !game.is_owned_by(user_id) || game.status != GameStatus::Playing {
            return Err(GameServiceError::NotFound);
        }
        Ok(game)
    }

    fn apply_chess_turn(
        &self,
        state: &mut ChessState,
        mv: &ChessMovePayload,
    ) -> Result<GameEnd, GameServiceError> {
        ChessService::apply_move(state, (mv.from[0], mv.from[1]), (mv.to[0], mv.to[1]))
            .map_err(|e| GameServiceError::IllegalMove(e.to_string()))?;

        let mut end = OutcomeService::resolve_chess(state);
        if !end.is_end {
            let reply = {
                let mut rng = self.rng.lock().expect("rng mutex poisoned");
                BotService::select_move(&state.board, state.side_to_move, &mut *rng)
            };
            match reply {
                Some((from, to)) => {
                    ChessService::apply_move(state, from, to)
                        .map_err(|e| GameServiceError::ChessError(e.to_string()))?;
                    end = OutcomeService::resolve_chess(state);
                }
                None => {
                    // The bot has no legal move; the turn returns to the
                    // player with the board unchanged.
                    state.side_to_move = state.side_to_move.opponent();
                }
            }
        }

        if end.is_end {
            state.is_game_over = true;
            state.winner = match end.result {
                Some(PlayerOutcome::Win) => Some(Side::White),
                Some(PlayerOutcome::Loss) => Some(Side::Black),
                _ => None,
            };
        }
        Ok(end)
    }

    /// Load (or lazily provision) the owner's ledger entry and apply the
    /// outcome; the caller persists the result inside the turn commit.
    async fn settle_stats(
        &self,
        user_id: &str,
        game: &Game,
        outcome: PlayerOutcome,
    ) -> Result<GameStats, GameServiceError> {
        let current = self.ensure_stats(user_id).await?;
        let mut updated =
            RatingService::apply_outcome(&current, game.game_type, outcome, game.game_mode);
        updated.version = current.version + 1;
        Ok(updated)
    }

    async fn ensure_stats(&self, user_id: &str) -> Result<GameStats, GameServiceError> {
        if let Some(stats) = self.stats.get_stats(user_id).await? {
            return Ok(stats);
        }
        let baseline = GameStats::baseline(user_id);
        match self.stats.create_stats(&baseline).await {
            Ok(()) => Ok(baseline),
            // Another request provisioned the entry first; use theirs.
            Err(StatsRepositoryError::AlreadyExists) => self
                .stats
                .get_stats(user_id)
                .await?
                .ok_or_else(|| {
                    GameServiceError::RepositoryError(
                        "Stats entry vanished after concurrent create".to_string(),
                    )
                }),
            Err(e) => Err(e.into()),
        }
    }
}

fn stored_result(outcome: PlayerOutcome) -> GameResult {
    match outcome {
        PlayerOutcome::Win => GameResult::Player1,
        PlayerOutcome::Loss => GameResult::Player2,
        PlayerOutcome::Draw => GameResult::Draw,
    }
}
