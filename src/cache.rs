//! Module load-cache notification.
//!
//! The host runtime caches loaded modules by path; whoever owns that cache
//! clears matching entries once a destination is fully written. The engine
//! only notifies, strictly after the final flush, so a half-written
//! artifact is never reloaded.

use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait InvalidationHook: Send + Sync {
    /// Called once per successful expose with the destination path.
    async fn invalidate(&self, pattern: &str) -> Result<()>;
}

/// Default hook for hosts without a load cache to clear.
pub struct NoopInvalidation;

#[async_trait]
impl InvalidationHook for NoopInvalidation {
    async fn invalidate(&self, _pattern: &str) -> Result<()> {
        Ok(())
    }
}
