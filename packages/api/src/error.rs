use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::models::responses::ErrorResponse;
use shared::services::errors::{
    auth_service_errors::AuthServiceError, game_service_errors::GameServiceError,
    stats_service_errors::StatsServiceError,
};

#[derive(Debug)]
pub enum ApiError {
    GameService(GameServiceError),
    StatsService(StatsServiceError),
    AuthService(AuthServiceError),
}

impl From<GameServiceError> for ApiError {
    fn from(error: GameServiceError) -> Self {
        ApiError::GameService(error)
    }
}

impl From<StatsServiceError> for ApiError {
    fn from(error: StatsServiceError) -> Self {
        ApiError::StatsService(error)
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(error: AuthServiceError) -> Self {
        ApiError::AuthService(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::GameService(GameServiceError::ValidationError(msg)) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::GameService(GameServiceError::NotFound) => (
                StatusCode::NOT_FOUND,
                "Game not found or not yours".to_string(),
            ),
            ApiError::GameService(GameServiceError::IllegalMove(msg)) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::GameService(GameServiceError::Conflict) => (
                StatusCode::CONFLICT,
                "Game was updated concurrently, retry the move".to_string(),
            ),
            ApiError::GameService(
                GameServiceError::ChessError(_) | GameServiceError::RepositoryError(_),
            ) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),

            ApiError::StatsService(StatsServiceError::ValidationError(msg)) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::StatsService(StatsServiceError::RepositoryError(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),

            ApiError::AuthService(AuthServiceError::ValidationError(msg)) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::AuthService(
                AuthServiceError::InvalidToken | AuthServiceError::ExpiredToken,
            ) => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
