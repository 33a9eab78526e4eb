use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

use super::{already_finished, Store};
use crate::{
    error::GameError,
    models::{Game, Score, User},
};

/// In-process store used when no database is configured, and by tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    /// Users in registration order
    users: Vec<User>,
    games: HashMap<Uuid, Game>,
    /// Game ids in creation order
    game_order: Vec<Uuid>,
    /// Scores in insertion order
    scores: Vec<Score>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn ordered_games(&self) -> impl Iterator<Item = &Game> {
        self.game_order.iter().filter_map(|id| self.games.get(id))
    }

    /// The stored copy of a game that may still be written to
    fn active_game_mut(&mut self, game_id: Uuid) -> Result<&mut Game, GameError> {
        let stored = self
            .games
            .get_mut(&game_id)
            .ok_or_else(GameError::game_not_found)?;
        if stored.game_over {
            return Err(already_finished(game_id));
        }
        Ok(stored)
    }
}

fn overwrite(stored: &mut Game, game: &Game) {
    stored.progress = game.progress.clone();
    stored.history = game.history.clone();
    stored.attempts_remaining = game.attempts_remaining;
    stored.game_over = game.game_over;
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), GameError> {
        let mut inner = self.inner.lock();
        if inner.users.iter().any(|u| u.user_name == user.user_name) {
            return Err(GameError::Conflict(
                "A User with that name already exists!".to_string(),
            ));
        }
        inner.users.push(user.clone());
        Ok(())
    }

    async fn get_user(&self, user_name: &str) -> Result<Option<User>, GameError> {
        let inner = self.inner.lock();
        Ok(inner
            .users
            .iter()
            .find(|u| u.user_name == user_name)
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, GameError> {
        Ok(self.inner.lock().users.clone())
    }

    async fn insert_game(&self, game: &Game) -> Result<(), GameError> {
        let mut inner = self.inner.lock();
        if inner.games.insert(game.game_id, game.clone()).is_none() {
            inner.game_order.push(game.game_id);
        }
        Ok(())
    }

    async fn get_game(&self, game_id: Uuid) -> Result<Option<Game>, GameError> {
        Ok(self.inner.lock().games.get(&game_id).cloned())
    }

    async fn update_game(&self, game: &Game) -> Result<(), GameError> {
        let mut inner = self.inner.lock();
        let stored = inner.active_game_mut(game.game_id)?;
        overwrite(stored, game);
        Ok(())
    }

    async fn finish_game(&self, game: &Game, score: &Score) -> Result<(), GameError> {
        let mut inner = self.inner.lock();
        if inner.scores.iter().any(|s| s.game_id == score.game_id) {
            return Err(already_finished(score.game_id));
        }

        // Every check happens before the first write
        let stored = inner.active_game_mut(game.game_id)?;
        overwrite(stored, game);
        stored.game_over = true;
        inner.scores.push(score.clone());
        Ok(())
    }

    async fn list_user_games(&self, user_name: &str) -> Result<Vec<Game>, GameError> {
        let inner = self.inner.lock();
        Ok(inner
            .ordered_games()
            .filter(|g| g.user_name == user_name)
            .cloned()
            .collect())
    }

    async fn list_active_games(&self) -> Result<Vec<Game>, GameError> {
        let inner = self.inner.lock();
        Ok(inner
            .ordered_games()
            .filter(|g| !g.game_over)
            .cloned()
            .collect())
    }

    async fn list_scores(&self) -> Result<Vec<Score>, GameError> {
        Ok(self.inner.lock().scores.clone())
    }

    async fn list_user_scores(&self, user_name: &str) -> Result<Vec<Score>, GameError> {
        let inner = self.inner.lock();
        Ok(inner
            .scores
            .iter()
            .filter(|s| s.user_name == user_name)
            .cloned()
            .collect())
    }
}
