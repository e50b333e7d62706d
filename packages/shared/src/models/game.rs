use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::chess::ChessState;
use crate::models::sudoku::SudokuState;

/// Opponent identity reported for bot-mode games; bots have no user record.
pub const BOT_OPPONENT_ID: &str = "bot";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Chess,
    Sudoku,
}

impl GameType {
    pub fn parse(value: &str) -> Option<GameType> {
        match value {
            "chess" => Some(GameType::Chess),
            "sudoku" => Some(GameType::Sudoku),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Chess => "chess",
            GameType::Sudoku => "sudoku",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Bot,
    Pvp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Waiting,
    Playing,
    Finished,
    Cancelled,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Waiting => "waiting",
            GameStatus::Playing => "playing",
            GameStatus::Finished => "finished",
            GameStatus::Cancelled => "cancelled",
        }
    }
}

/// Stored result of a finished game. `Timeout` is reserved; no code path
/// produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Player1,
    Player2,
    Draw,
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrentTurn {
    Player1,
    Player2,
}

/// Outcome of a finished game from the owner's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerOutcome {
    Win,
    Loss,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEnd {
    pub is_end: bool,
    pub result: Option<PlayerOutcome>,
}

impl GameEnd {
    pub fn continuing() -> Self {
        GameEnd {
            is_end: false,
            result: None,
        }
    }

    pub fn ended(outcome: PlayerOutcome) -> Self {
        GameEnd {
            is_end: true,
            result: Some(outcome),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum GameState {
    Chess(ChessState),
    Sudoku(SudokuState),
}

impl GameState {
    pub fn game_type(&self) -> GameType {
        match self {
            GameState::Chess(_) => GameType::Chess,
            GameState::Sudoku(_) => GameType::Sudoku,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub game_id: String,
    pub player1_id: String,
    pub player2_id: Option<String>,
    pub game_type: GameType,
    pub game_mode: GameMode,
    pub state: GameState,
    pub current_turn: CurrentTurn,
    pub status: GameStatus,
    pub result: Option<GameResult>,
    pub winner_id: Option<String>,
    /// Optimistic concurrency token; incremented on every committed mutation.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Game {
    /// Bot games have no waiting phase; they start in `Playing`.
    pub fn new_bot_game(owner_id: &str, state: GameState) -> Self {
        let now = Utc::now();
        let game_type = state.game_type();
        Game {
            game_id: Uuid::new_v4().to_string(),
            player1_id: owner_id.to_string(),
            player2_id: None,
            game_type,
            game_mode: GameMode::Bot,
            state,
            current_turn: CurrentTurn::Player1,
            status: GameStatus::Playing,
            result: None,
            winner_id: None,
            version: 1,
            created_at: now,
            updated_at: now,
            finished_at: None,
        }
    }

    pub fn opponent_id(&self) -> &str {
        self.player2_id.as_deref().unwrap_or(BOT_OPPONENT_ID)
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.player1_id == user_id
    }
}
