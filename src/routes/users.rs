use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{
    error::GameError,
    models::{NewUserRequest, StringMessage},
    AppState,
};

/// Create a user. Requires a unique user name.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewUserRequest>,
) -> Result<Json<StringMessage>, GameError> {
    let user = state
        .engine
        .register_user(&payload.user_name, payload.email)
        .await?;
    Ok(Json(StringMessage::new(format!(
        "User {} created!",
        user.user_name
    ))))
}
