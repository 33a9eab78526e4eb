use sqlx::{PgPool, Result};
use uuid::Uuid;

use crate::models::{Game, Score, User};

// User queries

/// Insert a user, returning `None` when the name is already registered
pub async fn create_user(pool: &PgPool, user: &User) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (user_name, email, created_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_name) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(&user.user_name)
    .bind(user.email.as_deref())
    .bind(user.created_at)
    .fetch_optional(pool)
    .await
}

pub async fn get_user(pool: &PgPool, user_name: &str) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_name = $1")
        .bind(user_name)
        .fetch_optional(pool)
        .await
}

pub async fn list_users(pool: &PgPool) -> Result<Vec<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at, user_name")
        .fetch_all(pool)
        .await
}

// Game queries

pub async fn create_game(pool: &PgPool, game: &Game) -> Result<Game> {
    sqlx::query_as::<_, Game>(
        r#"
        INSERT INTO games (
            game_id, user_name, target, progress, history,
            attempts_allowed, attempts_remaining, game_over, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(game.game_id)
    .bind(&game.user_name)
    .bind(&game.target)
    .bind(&game.progress)
    .bind(&game.history)
    .bind(game.attempts_allowed)
    .bind(game.attempts_remaining)
    .bind(game.game_over)
    .bind(game.created_at)
    .fetch_one(pool)
    .await
}

pub async fn get_game(pool: &PgPool, game_id: Uuid) -> Result<Option<Game>> {
    sqlx::query_as::<_, Game>("SELECT * FROM games WHERE game_id = $1")
        .bind(game_id)
        .fetch_optional(pool)
        .await
}

/// Persist the mutable part of an active game, returning the number of rows
/// touched. A finished game is never written again.
pub async fn update_game(pool: &PgPool, game: &Game) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE games
        SET progress = $1,
            history = $2,
            attempts_remaining = $3,
            game_over = $4,
            updated_at = NOW()
        WHERE game_id = $5 AND game_over = FALSE
        "#,
    )
    .bind(&game.progress)
    .bind(&game.history)
    .bind(game.attempts_remaining)
    .bind(game.game_over)
    .bind(game.game_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn get_user_games(pool: &PgPool, user_name: &str) -> Result<Vec<Game>> {
    sqlx::query_as::<_, Game>(
        "SELECT * FROM games WHERE user_name = $1 ORDER BY created_at",
    )
    .bind(user_name)
    .fetch_all(pool)
    .await
}

pub async fn get_active_games(pool: &PgPool) -> Result<Vec<Game>> {
    sqlx::query_as::<_, Game>(
        "SELECT * FROM games WHERE game_over = FALSE ORDER BY created_at",
    )
    .fetch_all(pool)
    .await
}

// Score queries

/// Result of [`finish_game`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishOutcome {
    Finished,
    Missing,
    AlreadyOver,
}

/// Mark a game finished and insert its score in one transaction.
///
/// The game row is locked with `FOR UPDATE` first, so concurrent finishers
/// on other connections wait, then see `game_over` and back off.
pub async fn finish_game(pool: &PgPool, game: &Game, score: &Score) -> Result<FinishOutcome> {
    let mut tx = pool.begin().await?;

    let game_over = sqlx::query_scalar::<_, bool>(
        "SELECT game_over FROM games WHERE game_id = $1 FOR UPDATE",
    )
    .bind(game.game_id)
    .fetch_optional(&mut *tx)
    .await?;

    match game_over {
        None => return Ok(FinishOutcome::Missing),
        Some(true) => return Ok(FinishOutcome::AlreadyOver),
        Some(false) => {}
    }

    sqlx::query(
        r#"
        UPDATE games
        SET progress = $1,
            history = $2,
            attempts_remaining = $3,
            game_over = TRUE,
            updated_at = NOW()
        WHERE game_id = $4
        "#,
    )
    .bind(&game.progress)
    .bind(&game.history)
    .bind(game.attempts_remaining)
    .bind(game.game_id)
    .execute(&mut *tx)
    .await?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO scores (score_id, game_id, user_name, won, guesses, date, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (game_id) DO NOTHING
        "#,
    )
    .bind(score.score_id)
    .bind(score.game_id)
    .bind(&score.user_name)
    .bind(score.won)
    .bind(score.guesses)
    .bind(score.date)
    .bind(score.created_at)
    .execute(&mut *tx)
    .await?;

    // Dropping the transaction rolls back the game update
    if inserted.rows_affected() == 0 {
        return Ok(FinishOutcome::AlreadyOver);
    }

    tx.commit().await?;
    Ok(FinishOutcome::Finished)
}

pub async fn get_scores(pool: &PgPool) -> Result<Vec<Score>> {
    sqlx::query_as::<_, Score>("SELECT * FROM scores ORDER BY created_at")
        .fetch_all(pool)
        .await
}

pub async fn get_user_scores(pool: &PgPool, user_name: &str) -> Result<Vec<Score>> {
    sqlx::query_as::<_, Score>(
        "SELECT * FROM scores WHERE user_name = $1 ORDER BY created_at",
    )
    .bind(user_name)
    .fetch_all(pool)
    .await
}
