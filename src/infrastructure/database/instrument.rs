//! Per-query timing.
//!
//! Every repository call goes through [`QueryInstrument::run`], which logs the
//! `model.action` pair with its latency, flags slow queries, and feeds the
//! query metrics. It never changes the query's outcome.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::infrastructure::metrics;

/// Default threshold above which a query is logged as slow.
pub const DEFAULT_SLOW_QUERY_THRESHOLD: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy)]
pub struct QueryInstrument {
    slow_threshold: Duration,
}

impl Default for QueryInstrument {
    fn default() -> Self {
        Self::new(DEFAULT_SLOW_QUERY_THRESHOLD)
    }
}

impl QueryInstrument {
    pub fn new(slow_threshold: Duration) -> Self {
        Self { slow_threshold }
    }

    /// Await `query`, logging and recording how long it took.
    pub async fn run<T, F>(&self, model: &'static str, action: &'static str, query: F) -> Result<T, sqlx::Error>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        let start = Instant::now();
        let result = query.await;
        let elapsed = start.elapsed();
        let elapsed_ms = elapsed.as_millis() as u64;

        metrics::record_db_query(model, action, elapsed.as_secs_f64(), result.is_err());

        match &result {
            Err(e) => {
                tracing::error!(model, action, elapsed_ms, error = %e, "Query failed");
            }
            Ok(_) if elapsed > self.slow_threshold => {
                tracing::warn!(model, action, elapsed_ms, "Slow query");
            }
            Ok(_) => {
                tracing::debug!(model, action, elapsed_ms, "Query");
            }
        }

        result
    }
}
