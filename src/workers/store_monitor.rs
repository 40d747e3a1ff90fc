use sqlx::PgPool;
use std::time::Duration;

/// Background probe of the like store.
///
/// Runs forever on a fixed delay. While the store is down, in-flight requests
/// fail fast through the pool's acquire timeout instead of queuing behind a
/// reconnect; this worker only watches for the connection coming back and
/// logs the up/down transitions.
pub struct StoreMonitor {
    db: PgPool,
    retry_delay: Duration,
}

impl StoreMonitor {
    pub fn new(db: PgPool, retry_delay: Duration) -> Self {
        Self { db, retry_delay }
    }

    pub async fn start(&self) {
        let mut healthy = true;
        loop {
            match sqlx::query("SELECT 1").execute(&self.db).await {
                Ok(_) => {
                    if !healthy {
                        tracing::info!("like store connection restored");
                        healthy = true;
                    }
                }
                Err(err) => {
                    if healthy {
                        tracing::error!(
                            error = %err,
                            retry_seconds = self.retry_delay.as_secs(),
                            "like store unreachable, retrying on a fixed delay"
                        );
                        healthy = false;
                    } else {
                        tracing::debug!(error = %err, "like store still unreachable");
                    }
                }
            }
            tokio::time::sleep(self.retry_delay).await;
        }
    }
}
