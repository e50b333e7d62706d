#[derive(Debug)]
pub enum StatsRepositoryError {
    Serialization(String),
    DynamoDb(String),
    AlreadyExists,
}

impl std::fmt::Display for StatsRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsRepositoryError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            StatsRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
            StatsRepositoryError::AlreadyExists => write!(f, "Stats entry already exists"),
        }
    }
}

impl std::error::Error for StatsRepositoryError {}
