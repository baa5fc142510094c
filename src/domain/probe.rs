//! Database reachability probe.

use async_trait::async_trait;

use crate::shared::error::AppError;

/// A trivial round trip to the store, used by the health endpoint and the
/// startup readiness check.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;
}
