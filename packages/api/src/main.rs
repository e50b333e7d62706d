use axum::{routing::get, Router};
use lambda_http::{run, tracing, Error};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use shared::repositories::game_repository::DynamoDbGameRepository;
use shared::repositories::stats_repository::DynamoDbStatsRepository;
use shared::repositories::user_repository::DynamoDbUserRepository;
use shared::services::auth_service::AuthService;
use shared::services::game_service::GameService;
use shared::services::stats_service::StatsService;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // required to enable CloudWatch error logging by the runtime
    tracing::init_default_subscriber();

    // Set up services
    let config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&config);

    let game_repository = Arc::new(DynamoDbGameRepository::new(client.clone()));
    let stats_repository = Arc::new(DynamoDbStatsRepository::new(client.clone()));
    let user_repository = Arc::new(DynamoDbUserRepository::new(client.clone()));

    let game_service = Arc::new(GameService::new(
        game_repository,
        stats_repository.clone(),
    ));
    let stats_service = Arc::new(StatsService::new(stats_repository, user_repository));
    let auth_service = Arc::new(AuthService::new());

    let app_state = state::AppState {
        game_service,
        stats_service,
        auth_service,
    };

    // Configure CORS
    // ToDo: Tighten this up
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Merge routes
    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::games::routes())
        .layer(cors)
        .with_state(app_state);

    run(app).await
}
