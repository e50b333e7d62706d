#[derive(Debug, PartialEq, Eq)]
pub enum ChessServiceError {
    IllegalMove(String),
    NotYourTurn,
}

impl std::fmt::Display for ChessServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChessServiceError::IllegalMove(msg) => write!(f, "Illegal move: {}", msg),
            ChessServiceError::NotYourTurn => write!(f, "Not your turn"),
        }
    }
}

impl std::error::Error for ChessServiceError {}
