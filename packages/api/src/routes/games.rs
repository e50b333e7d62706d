use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use lambda_http::tracing::error;

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::game::{Game, GameType};
use shared::models::move_record::MoveRecord;
use shared::models::requests::{CreateGameRequest, HistoryQuery, LeaderboardQuery, MoveRequest};
use shared::models::responses::{
    CreateGameResponse, DataResponse, MessageResponse, MoveResponse,
};
use shared::models::stats::{LeaderboardEntry, StatsSummary};
use shared::services::errors::game_service_errors::GameServiceError;
use shared::services::stats_service::DEFAULT_LEADERBOARD_LIMIT;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/games/create", post(create_game))
        .route("/games/stats", get(get_stats))
        .route("/games/leaderboard", get(get_leaderboard))
        .route("/games/leaderboard/{game_type}", get(get_leaderboard_for_type))
        .route("/games/user/active", get(get_active_games))
        .route("/games/user/history", get(get_user_history))
        .route("/games/{game_id}", get(get_game))
        .route("/games/{game_id}/move", post(make_move))
        .route("/games/{game_id}/resign", post(resign_game))
        .route("/games/{game_id}/history", get(get_game_history))
}

async fn create_game(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(payload): Json<CreateGameRequest>,
) -> Result<Json<CreateGameResponse>, ApiError> {
    let game_type = GameType::parse(&payload.game_type).ok_or_else(|| {
        ApiError::GameService(GameServiceError::ValidationError(
            "Invalid game type".to_string(),
        ))
    })?;

    let game = state
        .game_service
        .create_game(&authenticated_user.user_id, game_type)
        .await
        .map_err(|e| {
            error!(
                "Failed to create {} game for {}: {}",
                payload.game_type, authenticated_user.user_id, e
            );
            ApiError::from(e)
        })?;

    Ok(Json(CreateGameResponse {
        success: true,
        game_id: game.game_id,
        game_state: game.state,
        game_type: game.game_type,
    }))
}

async fn make_move(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    authenticated_user: AuthenticatedUser,
    Json(payload): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let applied = state
        .game_service
        .apply_move(&game_id, &authenticated_user.user_id, &payload.move_data)
        .await
        .map_err(|e| {
            error!("Failed to apply move to game {}: {}", game_id, e);
            ApiError::from(e)
        })?;

    Ok(Json(MoveResponse {
        success: true,
        game_state: applied.game.state,
        game_ended: applied.game_ended,
        move_id: applied.move_id,
    }))
}

async fn resign_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .game_service
        .resign(&game_id, &authenticated_user.user_id)
        .await
        .map_err(|e| {
            error!("Failed to resign game {}: {}", game_id, e);
            ApiError::from(e)
        })?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Game resigned successfully".to_string(),
    }))
}

async fn get_stats(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<DataResponse<StatsSummary>>, ApiError> {
    let stats = state
        .stats_service
        .get_or_create_stats(&authenticated_user.user_id)
        .await
        .map_err(|e| {
            error!(
                "Failed to fetch stats for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })?;

    Ok(Json(DataResponse::new(stats.summary())))
}

async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<DataResponse<Vec<LeaderboardEntry>>>, ApiError> {
    leaderboard(state, None, query).await
}

async fn get_leaderboard_for_type(
    State(state): State<AppState>,
    Path(game_type): Path<String>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<DataResponse<Vec<LeaderboardEntry>>>, ApiError> {
    // Unknown type filters fall back to the combined board.
    leaderboard(state, GameType::parse(&game_type), query).await
}

async fn leaderboard(
    state: AppState,
    filter: Option<GameType>,
    query: LeaderboardQuery,
) -> Result<Json<DataResponse<Vec<LeaderboardEntry>>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
    let entries = state
        .stats_service
        .leaderboard(filter, limit)
        .await
        .map_err(|e| {
            error!("Failed to fetch leaderboard: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(DataResponse::new(entries)))
}

async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<DataResponse<Game>>, ApiError> {
    let game = state
        .game_service
        .get_game(&game_id, &authenticated_user.user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DataResponse::new(game)))
}

async fn get_game_history(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<DataResponse<Vec<MoveRecord>>>, ApiError> {
    let moves = state
        .game_service
        .move_history(&game_id, &authenticated_user.user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DataResponse::new(moves)))
}

async fn get_active_games(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<DataResponse<Vec<Game>>>, ApiError> {
    let games = state
        .game_service
        .active_games(&authenticated_user.user_id)
        .await
        .map_err(|e| {
            error!(
                "Failed to fetch active games for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })?;

    Ok(Json(DataResponse::new(games)))
}

async fn get_user_history(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<DataResponse<Vec<Game>>>, ApiError> {
    let game_type = query.game_type.as_deref().and_then(GameType::parse);
    let games = state
        .game_service
        .finished_games(
            &authenticated_user.user_id,
            game_type,
            query.page.unwrap_or(1),
            query.limit.unwrap_or(20),
        )
        .await
        .map_err(|e| {
            error!(
                "Failed to fetch game history for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })?;

    Ok(Json(DataResponse::new(games)))
}
