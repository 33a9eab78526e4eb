pub mod games;
pub mod health;
pub mod scores;
pub mod users;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user", post(users::create_user))
        .route("/game", post(games::new_game))
        .route("/game/{game_id}", get(games::get_game).put(games::make_move))
        .route("/game/{game_id}/cancel", post(games::cancel_game))
        .route("/game/{game_id}/history", get(games::get_game_history))
        .route("/games/user/{user_name}", get(games::get_user_games))
        .route("/games/average_attempts", get(games::get_average_attempts))
        .route("/scores", get(scores::get_scores))
        .route("/scores/user/{user_name}", get(scores::get_user_scores))
        .route("/scores/highscores", get(scores::get_high_scores))
        .route("/scores/rankings", get(scores::get_user_rankings))
}
