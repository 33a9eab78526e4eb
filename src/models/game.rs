use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Persisted hangman game.
///
/// `target` is never serialized; clients only ever see a [`GameForm`].
#[derive(Debug, Clone, FromRow)]
pub struct Game {
    pub game_id: Uuid,
    pub user_name: String,
    pub target: String,
    /// Same length as `target`, unguessed positions hold a placeholder
    pub progress: String,
    /// Guessed letters in submission order, no duplicates
    pub history: String,
    pub attempts_allowed: i32,
    pub attempts_remaining: i32,
    pub game_over: bool,
    pub created_at: DateTime<Utc>,
}

impl Game {
    pub fn to_form(&self, message: impl Into<String>) -> GameForm {
        GameForm {
            game_id: self.game_id,
            user_name: self.user_name.clone(),
            progress: self.progress.clone(),
            history: self.history.clone(),
            attempts_remaining: self.attempts_remaining,
            game_over: self.game_over,
            message: message.into(),
        }
    }

    /// Number of attempts consumed so far
    pub fn guesses_used(&self) -> i32 {
        self.attempts_allowed - self.attempts_remaining
    }
}

/// Outbound game snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameForm {
    pub game_id: Uuid,
    pub user_name: String,
    pub progress: String,
    pub history: String,
    pub attempts_remaining: i32,
    pub game_over: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameForms {
    pub items: Vec<GameForm>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGameRequest {
    pub user_name: String,
    #[serde(default)]
    pub attempts: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MakeMoveRequest {
    pub guess: String,
}

/// A single guessed letter and whether it occurs in the target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub letter: char,
    pub correct: bool,
    pub outcome: String,
}

impl Move {
    pub fn new(letter: char, correct: bool) -> Self {
        let outcome = if correct { "Good guess!" } else { "Bad guess!" };
        Self {
            letter,
            correct,
            outcome: outcome.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryForm {
    pub moves: Vec<Move>,
}
