pub mod game;
pub mod score;
pub mod user;

pub use game::{
    // Persisted game
    Game,
    // Request and response bodies
    GameForm, GameForms, HistoryForm, MakeMoveRequest, Move, NewGameRequest,
};
pub use score::{HighScoreForm, HighScoreForms, HighScoresQuery, Score, ScoreForms};
pub use user::{NewUserRequest, User};

/// Plain confirmation message
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StringMessage {
    pub message: String,
}

impl StringMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
