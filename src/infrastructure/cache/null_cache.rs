//! No-op cache used when Redis is not configured.

use super::service::{CacheResult, CacheService};
use crate::domain::entities::Country;
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that never stores anything.
///
/// Used in development without Redis, in tests, and as the fallback when the
/// Redis connection fails at startup.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (record caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_country(&self, _code: &str) -> CacheResult<Option<Country>> {
        Ok(None)
    }

    async fn set_country(&self, _country: &Country, _ttl: Option<u64>) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _code: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
