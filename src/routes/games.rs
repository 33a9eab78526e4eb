use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::GameError,
    models::{GameForm, GameForms, HistoryForm, MakeMoveRequest, NewGameRequest, StringMessage},
    AppState,
};

/// Resolve a path identifier; malformed identifiers are treated as unknown games
fn parse_game_id(raw: &str) -> Result<Uuid, GameError> {
    Uuid::parse_str(raw).map_err(|_| GameError::game_not_found())
}

/// Start a new game
pub async fn new_game(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewGameRequest>,
) -> Result<Json<GameForm>, GameError> {
    let game = state
        .engine
        .start_game(&payload.user_name, payload.attempts)
        .await?;

    // Average attempts is not needed to answer this request
    state.stats_refresher.request_refresh();

    Ok(Json(game.to_form("Good luck playing Hangman!")))
}

/// Current state of a game
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<GameForm>, GameError> {
    let game = state.engine.get_game(parse_game_id(&game_id)?).await?;
    Ok(Json(game.to_form("Time to make a move!")))
}

/// Guess a letter
pub async fn make_move(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    Json(payload): Json<MakeMoveRequest>,
) -> Result<Json<GameForm>, GameError> {
    let (game, outcome) = state
        .engine
        .apply_guess(parse_game_id(&game_id)?, &payload.guess)
        .await?;
    Ok(Json(game.to_form(outcome.message())))
}

/// Cancel an active game
pub async fn cancel_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<StringMessage>, GameError> {
    state.engine.cancel_game(parse_game_id(&game_id)?).await?;
    state.stats_refresher.request_refresh();
    Ok(Json(StringMessage::new("Game cancelled!")))
}

pub async fn get_game_history(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<HistoryForm>, GameError> {
    let moves = state.engine.history(parse_game_id(&game_id)?).await?;
    Ok(Json(HistoryForm { moves }))
}

/// All games of a user
pub async fn get_user_games(
    State(state): State<Arc<AppState>>,
    Path(user_name): Path<String>,
) -> Result<Json<GameForms>, GameError> {
    let games = state.engine.user_games(&user_name).await?;
    Ok(Json(GameForms {
        items: games.iter().map(|game| game.to_form("")).collect(),
    }))
}

/// Cached average of attempts remaining across active games
pub async fn get_average_attempts(State(state): State<Arc<AppState>>) -> Json<StringMessage> {
    Json(StringMessage::new(
        state.stats.average_attempts().unwrap_or_default(),
    ))
}
