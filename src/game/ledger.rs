use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::Store,
    error::GameError,
    models::{Game, Score},
};

/// Append-only record of finished games
#[derive(Clone)]
pub struct ScoreLedger {
    store: Arc<dyn Store>,
}

impl ScoreLedger {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Persist a game that has just ended together with its score. Nothing is
    /// written when this fails, so the guess can be retried.
    pub async fn record(&self, game: &Game, won: bool) -> Result<Score, GameError> {
        let now = Utc::now();
        let score = Score {
            score_id: Uuid::new_v4(),
            game_id: game.game_id,
            user_name: game.user_name.clone(),
            won,
            guesses: game.guesses_used(),
            date: now.date_naive(),
            created_at: now,
        };
        self.store.finish_game(game, &score).await?;
        Ok(score)
    }

    pub async fn all(&self) -> Result<Vec<Score>, GameError> {
        self.store.list_scores().await
    }

    /// Scores of one user. Fails with `NotFound` for an unknown user.
    pub async fn for_user(&self, user_name: &str) -> Result<Vec<Score>, GameError> {
        if self.store.get_user(user_name).await?.is_none() {
            return Err(GameError::user_not_found());
        }
        self.store.list_user_scores(user_name).await
    }
}
