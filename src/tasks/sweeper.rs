//! Expiration Sweeper
//!
//! Background task that periodically removes expired cache entries,
//! independent of read/write traffic.

use std::hash::Hash;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::{SharedCache, MAX_TTL};

/// Shortest sweep period; a zero period would make the ticker panic
const MIN_SWEEP_PERIOD: Duration = Duration::from_millis(1);

// == Sweeper Handle ==
/// Owns the running sweep task and the token that stops it.
#[derive(Debug)]
pub struct SweeperHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    // == Shutdown ==
    /// Signals the sweeper to stop and waits for the task to exit.
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            warn!(error = %e, "Expiration sweeper did not exit cleanly");
        }
    }
}

/// Spawns a background task that purges expired entries every `period`.
///
/// The period is clamped to `[1ms, MAX_TTL]`. The first sweep runs one full
/// period after the call. Each pass holds the cache lock for the duration of
/// the scan and only removes entries whose deadline has passed. The task runs
/// until `shutdown` is cancelled, either directly or through
/// [`SweeperHandle::shutdown`].
///
/// # Example
/// ```ignore
/// let cache = SharedCache::new(CacheStore::new(1024, 60)?);
/// let sweeper = spawn_sweeper(cache.clone(), Duration::from_secs(60), CancellationToken::new());
/// // Later, during shutdown:
/// sweeper.shutdown().await;
/// ```
pub fn spawn_sweeper<K, V>(
    cache: SharedCache<K, V>,
    period: Duration,
    shutdown: CancellationToken,
) -> SweeperHandle
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    let token = shutdown.clone();
    let period = period.clamp(MIN_SWEEP_PERIOD, MAX_TTL);

    let task = tokio::spawn(async move {
        info!(period_ms = period.as_millis() as u64, "Starting expiration sweeper");

        let start = Instant::now();
        let mut ticker = interval_at(start.checked_add(period).unwrap_or(start), period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Expiration sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = cache.purge_expired().await;
                    if removed > 0 {
                        info!(removed, "TTL sweep removed expired entries");
                    } else {
                        debug!("TTL sweep found no expired entries");
                    }
                }
            }
        }
    });

    SweeperHandle { token, task }
}
