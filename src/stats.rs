use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::{db::Store, error::GameError, models::Game};

/// Mean `attempts_remaining` over the given games, `None` when there are none
pub fn average_attempts(games: &[Game]) -> Option<f64> {
    if games.is_empty() {
        return None;
    }
    let total: i64 = games.iter().map(|g| i64::from(g.attempts_remaining)).sum();
    Some(total as f64 / games.len() as f64)
}

/// Single-slot cache for the average attempts remaining across active games.
///
/// Starts empty. Only the background refresher writes to it; request
/// handlers only read.
#[derive(Default)]
pub struct StatsCache {
    average_attempts: RwLock<Option<String>>,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last computed value, if any
    pub fn average_attempts(&self) -> Option<String> {
        self.average_attempts.read().clone()
    }

    /// Scan active games and replace the cached average
    pub async fn recompute(&self, store: &dyn Store) -> Result<(), GameError> {
        let games = store.list_active_games().await?;
        let value = average_attempts(&games)
            .map(|average| format!("The average moves remaining is {:.2}", average));

        tracing::debug!(
            "Recomputed average attempts over {} active games: {:?}",
            games.len(),
            value
        );
        *self.average_attempts.write() = value;
        Ok(())
    }
}

/// Handle for requesting out-of-band recomputation of the [`StatsCache`].
///
/// Requests go through a bounded channel to a background task; when the
/// queue is full the request is dropped, since a pending recomputation will
/// see the same state.
#[derive(Clone)]
pub struct StatsRefresher {
    tx: mpsc::Sender<()>,
}

impl StatsRefresher {
    /// Spawn the background task on the current tokio runtime
    pub fn spawn(cache: Arc<StatsCache>, store: Arc<dyn Store>, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        tokio::spawn(refresh_task(rx, cache, store));
        Self { tx }
    }

    /// Queue a recomputation without waiting for it
    pub fn request_refresh(&self) {
        match self.tx.try_send(()) {
            Ok(()) => {}
            Err(TrySendError::Full(())) => {
                tracing::debug!("Stats refresh already queued, skipping request");
            }
            Err(TrySendError::Closed(())) => {
                tracing::warn!("Stats refresh task is not running");
            }
        }
    }
}

/// Drains refresh requests until every sender is gone
async fn refresh_task(
    mut rx: mpsc::Receiver<()>,
    cache: Arc<StatsCache>,
    store: Arc<dyn Store>,
) {
    while rx.recv().await.is_some() {
        if let Err(e) = cache.recompute(store.as_ref()).await {
            tracing::warn!("Failed to recompute average attempts: {}", e);
        }
    }
    tracing::debug!("Stats refresh task stopped");
}
