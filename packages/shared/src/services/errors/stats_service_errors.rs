use crate::repositories::errors::stats_repository_errors::StatsRepositoryError;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;

#[derive(Debug)]
pub enum StatsServiceError {
    ValidationError(String),
    RepositoryError(String),
}

impl std::fmt::Display for StatsServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            StatsServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for StatsServiceError {}

impl From<StatsRepositoryError> for StatsServiceError {
    fn from(err: StatsRepositoryError) -> Self {
        StatsServiceError::RepositoryError(err.to_string())
    }
}

impl From<UserRepositoryError> for StatsServiceError {
    fn from(err: UserRepositoryError) -> Self {
        StatsServiceError::RepositoryError(err.to_string())
    }
}
