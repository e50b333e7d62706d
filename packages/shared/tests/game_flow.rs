use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use shared::models::chess::{PieceKind, Side};
use shared::models::game::{Game, GameResult, GameState, GameStatus, GameType, PlayerOutcome};
use shared::models::move_record::{ChessMovePayload, MovePayload, MoveRecord, SudokuMovePayload};
use shared::models::stats::GameStats;
use shared::models::sudoku::GRID_SIZE;
use shared::repositories::errors::game_repository_errors::GameRepositoryError;
use shared::repositories::errors::stats_repository_errors::StatsRepositoryError;
use shared::repositories::game_repository::GameRepository;
use shared::repositories::stats_repository::StatsRepository;
use shared::services::game_service::GameService;

#[derive(Default)]
struct SharedStore {
    games: Mutex<HashMap<String, Game>>,
    moves: Mutex<Vec<MoveRecord>>,
    stats: Mutex<HashMap<String, GameStats>>,
}

struct InMemoryGameRepository {
    store: Arc<SharedStore>,
}

struct InMemoryStatsRepository {
    store: Arc<SharedStore>,
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        self.store
            .games
            .lock()
            .unwrap()
            .insert(game.game_id.clone(), game.clone());
        Ok(())
    }

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError> {
        Ok(self.store.games.lock().unwrap().get(game_id).cloned())
    }

    async fn next_move_number(&self, game_id: &str) -> Result<u64, GameRepositoryError> {
        let last = self
            .store
            .moves
            .lock()
            .unwrap()
            .iter()
            .filter(|record| record.game_id == game_id)
            .map(|record| record.move_number)
            .max()
            .unwrap_or(0);
        Ok(last + 1)
    }

    async fn commit_turn(
        &self,
        game: &Game,
        expected_version: u64,
        move_record: Option<MoveRecord>,
        stats: Option<GameStats>,
    ) -> Result<(), GameRepositoryError> {
        let mut games = self.store.games.lock().unwrap();
        let mut stats_map = self.store.stats.lock().unwrap();

        let current = games
            .get(&game.game_id)
            .ok_or_else(|| GameRepositoryError::DynamoDb("game does not exist".to_string()))?;
        if current.version != expected_version {
            return Err(GameRepositoryError::VersionConflict);
        }
        if let Some(stats) = &stats {
            let existing_version = stats_map
                .get(&stats.user_id)
                .map(|existing| existing.version)
                .unwrap_or(0);
            if existing_version != stats.version - 1 {
                return Err(GameRepositoryError::VersionConflict);
            }
        }

        games.insert(game.game_id.clone(), game.clone());
        if let Some(record) = move_record {
            self.store.moves.lock().unwrap().push(record);
        }
        if let Some(stats) = stats {
            stats_map.insert(stats.user_id.clone(), stats);
        }
        Ok(())
    }

    async fn list_moves(&self, game_id: &str) -> Result<Vec<MoveRecord>, GameRepositoryError> {
        let mut moves: Vec<MoveRecord> = self
            .store
            .moves
            .lock()
            .unwrap()
            .iter()
            .filter(|record| record.game_id == game_id)
            .cloned()
            .collect();
        moves.sort_by_key(|record| record.move_number);
        Ok(moves)
    }

    async fn list_active_games(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let mut games: Vec<Game> = self
            .store
            .games
            .lock()
            .unwrap()
            .values()
            .filter(|game| game.player1_id == user_id && game.status == GameStatus::Playing)
            .cloned()
            .collect();
        games.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        games.truncate(limit);
        Ok(games)
    }

    async fn list_finished_games(&self, user_id: &str) -> Result<Vec<Game>, GameRepositoryError> {
        Ok(self
            .store
            .games
            .lock()
            .unwrap()
            .values()
            .filter(|game| game.player1_id == user_id && game.status == GameStatus::Finished)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StatsRepository for InMemoryStatsRepository {
    async fn get_stats(&self, user_id: &str) -> Result<Option<GameStats>, StatsRepositoryError> {
        Ok(self.store.stats.lock().unwrap().get(user_id).cloned())
    }

    async fn create_stats(&self, stats: &GameStats) -> Result<(), StatsRepositoryError> {
        let mut stats_map = self.store.stats.lock().unwrap();
        if stats_map.contains_key(&stats.user_id) {
            return Err(StatsRepositoryError::AlreadyExists);
        }
        stats_map.insert(stats.user_id.clone(), stats.clone());
        Ok(())
    }

    async fn scan_stats(&self) -> Result<Vec<GameStats>, StatsRepositoryError> {
        Ok(self.store.stats.lock().unwrap().values().cloned().collect())
    }
}

fn harness(seed: u64) -> (GameService, Arc<SharedStore>) {
    let store = Arc::new(SharedStore::default());
    let games = Arc::new(InMemoryGameRepository {
        store: store.clone(),
    });
    let stats = Arc::new(InMemoryStatsRepository {
        store: store.clone(),
    });
    (GameService::with_seed(games, stats, seed), store)
}

fn chess_move(from: [usize; 2], to: [usize; 2]) -> MovePayload {
    MovePayload::Chess(ChessMovePayload { from, to })
}

#[tokio::test]
async fn test_chess_opening_move_and_bot_reply() {
    let (service, store) = harness(11);
    let game = service.create_game("user-1", GameType::Chess).await.unwrap();

    let applied = service
        .apply_move(&game.game_id, "user-1", &chess_move([6, 4], [4, 4]))
        .await
        .unwrap();

    assert!(!applied.game_ended.is_end);
    assert_eq!(applied.move_id, 1);

    let GameState::Chess(state) = &applied.game.state else {
        panic!("expected chess state");
    };
    assert!(state.board[6][4].is_none());
    let pawn = state.board[4][4].expect("pawn moved to e4");
    assert_eq!(pawn.kind, PieceKind::Pawn);
    assert_eq!(pawn.side, Side::White);

    // The human move flipped the side to Black; the bot reply flipped it
    // back, so the history carries both moves.
    assert_eq!(state.move_history.len(), 2);
    assert_eq!(state.side_to_move, Side::White);
    assert_eq!(state.move_history[1].piece.side, Side::Black);

    let stored = store.games.lock().unwrap().get(&game.game_id).cloned().unwrap();
    assert_eq!(stored.version, 2);
    assert_eq!(stored.status, GameStatus::Playing);
}

#[tokio::test]
async fn test_move_numbers_are_sequential() {
    let (service, _store) = harness(3);
    let game = service.create_game("user-1", GameType::Chess).await.unwrap();

    service
        .apply_move(&game.game_id, "user-1", &chess_move([6, 4], [4, 4]))
        .await
        .unwrap();
    // No black piece can reach rows 4-6 in one reply, so the second push is
    // always legal.
    let second = service
        .apply_move(&game.game_id, "user-1", &chess_move([6, 3], [4, 3]))
        .await
        .unwrap();
    assert_eq!(second.move_id, 2);

    let history = service.move_history(&game.game_id, "user-1").await.unwrap();
    let numbers: Vec<u64> = history.iter().map(|record| record.move_number).collect();
    assert_eq!(numbers, (1..=history.len() as u64).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_sudoku_solve_awards_the_win() {
    let (service, store) = harness(5);
    let game = service.create_game("user-1", GameType::Sudoku).await.unwrap();

    let GameState::Sudoku(initial) = &game.state else {
        panic!("expected sudoku state");
    };
    let puzzle = initial.puzzle;
    let solution = initial.solution;

    let mut blanks: Vec<(usize, usize)> = Vec::new();
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            if puzzle[row][col] == 0 {
                blanks.push((row, col));
            }
        }
    }
    assert!(!blanks.is_empty());

    let mut last = None;
    for &(row, col) in &blanks {
        let payload = MovePayload::Sudoku(SudokuMovePayload {
            row,
            col,
            value: solution[row][col],
        });
        let applied = service
            .apply_move(&game.game_id, "user-1", &payload)
            .await
            .unwrap();
        last = Some(applied);
    }

    let last = last.unwrap();
    assert!(last.game_ended.is_end);
    assert_eq!(last.game_ended.result, Some(PlayerOutcome::Win));
    assert_eq!(last.move_id, blanks.len() as u64);

    let stored = store.games.lock().unwrap().get(&game.game_id).cloned().unwrap();
    assert_eq!(stored.status, GameStatus::Finished);
    assert_eq!(stored.result, Some(GameResult::Player1));
    assert_eq!(stored.winner_id.as_deref(), Some("user-1"));
    assert!(stored.finished_at.is_some());

    let stats = store.stats.lock().unwrap().get("user-1").cloned().unwrap();
    assert_eq!(stats.sudoku_wins, 1);
    assert_eq!(stats.sudoku_bot_wins, 1);
    assert_eq!(stats.sudoku_total_games, 1);
    assert_eq!(stats.total_points, 30);
    assert_eq!(stats.rating, 1215);
    assert_eq!(stats.highest_rating, 1215);
}

#[tokio::test]
async fn test_resign_records_the_loss() {
    let (service, store) = harness(8);
    let game = service.create_game("user-1", GameType::Chess).await.unwrap();

    let resigned = service.resign(&game.game_id, "user-1").await.unwrap();

    assert_eq!(resigned.status, GameStatus::Finished);
    assert_eq!(resigned.result, Some(GameResult::Player2));
    assert!(resigned.winner_id.is_none());

    let stats = store.stats.lock().unwrap().get("user-1").cloned().unwrap();
    assert_eq!(stats.chess_losses, 1);
    assert_eq!(stats.chess_wins, 0);
    assert_eq!(stats.chess_draws, 0);
    assert_eq!(stats.chess_total_games, 1);
    assert_eq!(stats.rating, 1190);
    // Baseline points floor at zero rather than going negative.
    assert_eq!(stats.total_points, 0);

    // A finished game is gone as far as further moves are concerned.
    let result = service
        .apply_move(&game.game_id, "user-1", &chess_move([6, 4], [4, 4]))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_concurrent_commits_cannot_share_a_snapshot() {
    let (service, store) = harness(2);
    let game = service.create_game("user-1", GameType::Chess).await.unwrap();

    let repo = InMemoryGameRepository { store };
    let mut first = game.clone();
    first.version = game.version + 1;
    let mut second = game.clone();
    second.version = game.version + 1;

    repo.commit_turn(&first, game.version, None, None)
        .await
        .unwrap();
    let conflict = repo.commit_turn(&second, game.version, None, None).await;

    assert!(matches!(conflict, Err(GameRepositoryError::VersionConflict)));
}

#[tokio::test]
async fn test_listings_split_active_and_finished() {
    let (service, _store) = harness(4);
    let active = service.create_game("user-1", GameType::Chess).await.unwrap();
    let finished = service.create_game("user-1", GameType::Sudoku).await.unwrap();
    service.resign(&finished.game_id, "user-1").await.unwrap();

    let playing = service.active_games("user-1").await.unwrap();
    assert_eq!(playing.len(), 1);
    assert_eq!(playing[0].game_id, active.game_id);

    let done = service
        .finished_games("user-1", None, 1, 20)
        .await
        .unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].game_id, finished.game_id);

    let chess_only = service
        .finished_games("user-1", Some(GameType::Chess), 1, 20)
        .await
        .unwrap();
    assert!(chess_only.is_empty());
}
