use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Outcome of one terminated game. Written once, never updated.
#[derive(Debug, Clone, FromRow)]
pub struct Score {
    pub score_id: Uuid,
    /// Game this score was recorded for; at most one score per game
    pub game_id: Uuid,
    pub user_name: String,
    pub won: bool,
    pub guesses: i32,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Score {
    pub fn to_form(&self) -> ScoreForm {
        ScoreForm {
            user_name: self.user_name.clone(),
            date: self.date.to_string(),
            won: self.won,
            guesses: self.guesses,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreForm {
    pub user_name: String,
    pub date: String,
    pub won: bool,
    pub guesses: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreForms {
    pub items: Vec<ScoreForm>,
}

/// A user's net score (wins minus losses)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreForm {
    pub user_name: String,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreForms {
    pub high_scores: Vec<HighScoreForm>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HighScoresQuery {
    pub number_of_results: i64,
}
