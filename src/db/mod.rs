use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::{
    error::GameError,
    models::{Game, Score, User},
};

pub mod memory;
pub mod queries;

pub use memory::MemoryStore;

pub async fn create_pool(database_url: &str, max_connections: u32) -> sqlx::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Record store for users, games and scores.
///
/// Listing operations return records in insertion order.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a new user. Fails with `Conflict` when the name is taken.
    async fn insert_user(&self, user: &User) -> Result<(), GameError>;

    async fn get_user(&self, user_name: &str) -> Result<Option<User>, GameError>;

    /// All users in registration order
    async fn list_users(&self) -> Result<Vec<User>, GameError>;

    async fn insert_game(&self, game: &Game) -> Result<(), GameError>;

    async fn get_game(&self, game_id: Uuid) -> Result<Option<Game>, GameError>;

    /// Overwrite the mutable fields of an active game. Fails with `NotFound`
    /// for an unknown game and `Conflict` once the stored game is over.
    async fn update_game(&self, game: &Game) -> Result<(), GameError>;

    /// Write a finished game and its score as one unit: either both land or
    /// neither does. Fails with `Conflict` if the stored game is already over
    /// or already has a score.
    async fn finish_game(&self, game: &Game, score: &Score) -> Result<(), GameError>;

    async fn list_user_games(&self, user_name: &str) -> Result<Vec<Game>, GameError>;

    /// Games with `game_over == false`
    async fn list_active_games(&self) -> Result<Vec<Game>, GameError>;

    async fn list_scores(&self) -> Result<Vec<Score>, GameError>;

    async fn list_user_scores(&self, user_name: &str) -> Result<Vec<Score>, GameError>;
}

pub(crate) fn already_finished(game_id: Uuid) -> GameError {
    GameError::Conflict(format!("Game {} is already finished", game_id))
}

/// Postgres-backed store
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: &User) -> Result<(), GameError> {
        match queries::create_user(&self.pool, user).await? {
            Some(_) => Ok(()),
            None => Err(GameError::Conflict(
                "A User with that name already exists!".to_string(),
            )),
        }
    }

    async fn get_user(&self, user_name: &str) -> Result<Option<User>, GameError> {
        Ok(queries::get_user(&self.pool, user_name).await?)
    }

    async fn list_users(&self) -> Result<Vec<User>, GameError> {
        Ok(queries::list_users(&self.pool).await?)
    }

    async fn insert_game(&self, game: &Game) -> Result<(), GameError> {
        queries::create_game(&self.pool, game).await?;
        Ok(())
    }

    async fn get_game(&self, game_id: Uuid) -> Result<Option<Game>, GameError> {
        Ok(queries::get_game(&self.pool, game_id).await?)
    }

    async fn update_game(&self, game: &Game) -> Result<(), GameError> {
        if queries::update_game(&self.pool, game).await? > 0 {
            return Ok(());
        }
        match queries::get_game(&self.pool, game.game_id).await? {
            Some(_) => Err(already_finished(game.game_id)),
            None => Err(GameError::game_not_found()),
        }
    }

    async fn finish_game(&self, game: &Game, score: &Score) -> Result<(), GameError> {
        match queries::finish_game(&self.pool, game, score).await? {
            queries::FinishOutcome::Finished => Ok(()),
            queries::FinishOutcome::Missing => Err(GameError::game_not_found()),
            queries::FinishOutcome::AlreadyOver => Err(already_finished(game.game_id)),
        }
    }

    async fn list_user_games(&self, user_name: &str) -> Result<Vec<Game>, GameError> {
        Ok(queries::get_user_games(&self.pool, user_name).await?)
    }

    async fn list_active_games(&self) -> Result<Vec<Game>, GameError> {
        Ok(queries::get_active_games(&self.pool).await?)
    }

    async fn list_scores(&self) -> Result<Vec<Score>, GameError> {
        Ok(queries::get_scores(&self.pool).await?)
    }

    async fn list_user_scores(&self, user_name: &str) -> Result<Vec<Score>, GameError> {
        Ok(queries::get_user_scores(&self.pool, user_name).await?)
    }
}
