use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::GameError,
    models::{HighScoreForms, HighScoresQuery, ScoreForms},
    AppState,
};

/// Every recorded score
pub async fn get_scores(State(state): State<Arc<AppState>>) -> Result<Json<ScoreForms>, GameError> {
    let scores = state.ledger.all().await?;
    Ok(Json(ScoreForms {
        items: scores.iter().map(|s| s.to_form()).collect(),
    }))
}

pub async fn get_user_scores(
    State(state): State<Arc<AppState>>,
    Path(user_name): Path<String>,
) -> Result<Json<ScoreForms>, GameError> {
    let scores = state.ledger.for_user(&user_name).await?;
    Ok(Json(ScoreForms {
        items: scores.iter().map(|s| s.to_form()).collect(),
    }))
}

/// Top users by net score
pub async fn get_high_scores(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HighScoresQuery>,
) -> Result<Json<HighScoreForms>, GameError> {
    let high_scores = state.rankings.leaderboard(query.number_of_results).await?;
    Ok(Json(HighScoreForms { high_scores }))
}

/// Net score of every user, unsorted
pub async fn get_user_rankings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HighScoreForms>, GameError> {
    let high_scores = state.rankings.rankings().await?;
    Ok(Json(HighScoreForms { high_scores }))
}
