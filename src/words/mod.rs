use std::path::Path;

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use tokio::fs;

use crate::error::GameError;

/// Supplies target words for new games
#[async_trait]
pub trait WordSource: Send + Sync {
    /// A lowercase, non-empty, alphabetic word
    async fn next_word(&self) -> Result<String, GameError>;
}

/// Trim and lowercase a candidate word, rejecting anything that is not a
/// non-empty run of ASCII letters.
pub fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim().to_lowercase();
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(word)
    } else {
        None
    }
}

/// Fetches one word per game from a plain-text HTTP endpoint
pub struct HttpWordSource {
    client: reqwest::Client,
    url: String,
}

impl HttpWordSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl WordSource for HttpWordSource {
    async fn next_word(&self) -> Result<String, GameError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            tracing::error!("Word source request to {} failed: {}", self.url, e);
            GameError::DependencyFailure(format!("request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Word source returned {}", status);
            return Err(GameError::DependencyFailure(format!(
                "word source returned status {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GameError::DependencyFailure(format!("unreadable response: {}", e)))?;

        normalize_word(&body).ok_or_else(|| {
            tracing::error!("Word source returned an unusable word: {:?}", body);
            GameError::DependencyFailure("word source returned an invalid word".to_string())
        })
    }
}

/// Draws words at random from a local newline-separated list
pub struct DictionaryWordSource {
    words: Vec<String>,
}

impl DictionaryWordSource {
    /// Load a word list from a file
    pub async fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path).await?;
        let source = Self::from_words(content.lines());

        tracing::info!("Loaded {} words into word list", source.len());

        Ok(source)
    }

    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            words: words.into_iter().filter_map(normalize_word).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn pick(&self) -> Option<String> {
        self.words.choose(&mut rand::rng()).cloned()
    }
}

#[async_trait]
impl WordSource for DictionaryWordSource {
    async fn next_word(&self) -> Result<String, GameError> {
        self.pick()
            .ok_or_else(|| GameError::DependencyFailure("word list is empty".to_string()))
    }
}

/// Always hands out the same word
#[cfg(test)]
pub struct FixedWordSource(pub &'static str);

#[cfg(test)]
#[async_trait]
impl WordSource for FixedWordSource {
    async fn next_word(&self) -> Result<String, GameError> {
        normalize_word(self.0)
            .ok_or_else(|| GameError::DependencyFailure("invalid fixed word".to_string()))
    }
}
