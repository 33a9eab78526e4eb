use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

pub const DEFAULT_WORD_SOURCE_URL: &str = "http://randomword.setgetgo.com/get.php";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub words: WordSourceConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection string; the in-memory store is used when absent
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordSourceConfig {
    pub url: String,
    /// Local word list; takes precedence over `url` when set
    pub list_path: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub default_attempts: i32,
    pub stats_queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            words: WordSourceConfig {
                url: DEFAULT_WORD_SOURCE_URL.to_string(),
                list_path: None,
                timeout_secs: 10,
            },
            game: GameConfig {
                default_attempts: 10,
                stats_queue_capacity: 16,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let database = DatabaseConfig {
            url: non_empty_var("DATABASE_URL"),
            max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database.max_connections,
            )?,
        };

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or(defaults.server.host),
            port: parse_var("PORT", defaults.server.port)?,
        };

        let words = WordSourceConfig {
            url: env::var("WORD_SOURCE_URL").unwrap_or(defaults.words.url),
            list_path: non_empty_var("WORD_LIST_PATH"),
            timeout_secs: parse_var("WORD_SOURCE_TIMEOUT_SECS", defaults.words.timeout_secs)?,
        };

        let game = GameConfig {
            default_attempts: parse_var("DEFAULT_ATTEMPTS", defaults.game.default_attempts)?,
            stats_queue_capacity: parse_var(
                "STATS_QUEUE_CAPACITY",
                defaults.game.stats_queue_capacity,
            )?,
        };

        if game.default_attempts < 1 {
            anyhow::bail!("DEFAULT_ATTEMPTS must be a positive number");
        }

        Ok(Config {
            database,
            server,
            words,
            game,
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database.url.as_deref()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number", key)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.game.default_attempts, 10);
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert!(config.database_url().is_none());
        assert_eq!(config.words.url, DEFAULT_WORD_SOURCE_URL);
    }

    #[test]
    fn test_parse_var_falls_back_to_default() {
        let value: u16 = parse_var("HANGMAN_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
