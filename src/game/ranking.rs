use std::{collections::HashMap, sync::Arc};

use crate::{
    db::Store,
    error::GameError,
    models::{HighScoreForm, Score},
};

/// Net score contribution of a single game: +1 for a win, -1 for a loss
fn score_value(score: &Score) -> i64 {
    if score.won {
        1
    } else {
        -1
    }
}

/// Wins minus losses over a set of scores. Guesses used carry no weight.
pub fn net_score<'a>(scores: impl IntoIterator<Item = &'a Score>) -> i64 {
    scores.into_iter().map(score_value).sum()
}

/// Sort entries by descending score.
///
/// The sort is stable: users with equal scores keep the order they were
/// given in.
pub fn rank(mut entries: Vec<HighScoreForm>) -> Vec<HighScoreForm> {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}

/// Aggregates the score ledger into per-user net scores and leaderboards
pub struct RankingService {
    store: Arc<dyn Store>,
}

impl RankingService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Net score of one user
    pub async fn user_score(&self, user_name: &str) -> Result<i64, GameError> {
        if self.store.get_user(user_name).await?.is_none() {
            return Err(GameError::user_not_found());
        }
        let scores = self.store.list_user_scores(user_name).await?;
        Ok(net_score(&scores))
    }

    /// Net score of every user, in registration order
    pub async fn rankings(&self) -> Result<Vec<HighScoreForm>, GameError> {
        let users = self.store.list_users().await?;
        let scores = self.store.list_scores().await?;

        let mut by_user: HashMap<&str, Vec<&Score>> = HashMap::new();
        for score in &scores {
            by_user.entry(score.user_name.as_str()).or_default().push(score);
        }

        Ok(users
            .into_iter()
            .map(|user| {
                let user_scores = by_user.remove(user.user_name.as_str()).unwrap_or_default();
                HighScoreForm {
                    score: net_score(user_scores),
                    user_name: user.user_name,
                }
            })
            .collect())
    }

    /// The `top_n` best users by net score
    pub async fn leaderboard(&self, top_n: i64) -> Result<Vec<HighScoreForm>, GameError> {
        let top_n = usize::try_from(top_n).map_err(|_| {
            GameError::InvalidInput("number_of_results must not be negative".to_string())
        })?;

        let mut ranked = rank(self.rankings().await?);
        ranked.truncate(top_n);
        Ok(ranked)
    }
}
