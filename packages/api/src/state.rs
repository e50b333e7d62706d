use std::sync::Arc;

use shared::services::auth_service::AuthService;
use shared::services::game_service::GameService;
use shared::services::stats_service::StatsService;

#[derive(Clone)]
pub struct AppState {
    pub game_service: Arc<GameService>,
    pub stats_service: Arc<StatsService>,
    pub auth_service: Arc<AuthService>,
}
