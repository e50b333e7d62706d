use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::repositories::errors::stats_repository_errors::StatsRepositoryError;

#[derive(Debug)]
pub enum GameServiceError {
    ValidationError(String),
    /// Missing, not owned by the caller, or not in a playable state; the
    /// three are deliberately indistinguishable to the caller.
    NotFound,
    IllegalMove(String),
    /// Lost an optimistic-concurrency race; the caller may retry.
    Conflict,
    ChessError(String),
    RepositoryError(String),
}

impl std::fmt::Display for GameServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            GameServiceError::NotFound => write!(f, "Game not found or not yours"),
            GameServiceError::IllegalMove(msg) => write!(f, "Illegal move: {}", msg),
            GameServiceError::Conflict => write!(f, "Game was updated concurrently"),
            GameServiceError::ChessError(msg) => write!(f, "Chess engine error: {}", msg),
            GameServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GameServiceError {}

impl From<GameRepositoryError> for GameServiceError {
    fn from(err: GameRepositoryError) -> Self {
        match err {
            GameRepositoryError::VersionConflict => GameServiceError::Conflict,
            other => GameServiceError::RepositoryError(other.to_string()),
        }
    }
}

impl From<StatsRepositoryError> for GameServiceError {
    fn from(err: StatsRepositoryError) -> Self {
        GameServiceError::RepositoryError(err.to_string())
    }
}
