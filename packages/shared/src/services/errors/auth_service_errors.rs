#[derive(Debug, PartialEq, Eq)]
pub enum AuthServiceError {
    ValidationError(String),
    InvalidToken,
    ExpiredToken,
}

impl std::fmt::Display for AuthServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AuthServiceError::InvalidToken => write!(f, "Invalid token"),
            AuthServiceError::ExpiredToken => write!(f, "Expired token"),
        }
    }
}

impl std::error::Error for AuthServiceError {}
