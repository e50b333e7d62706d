pub mod auth_service_errors;
pub mod chess_service_errors;
pub mod game_service_errors;
pub mod stats_service_errors;
pub mod sudoku_service_errors;
