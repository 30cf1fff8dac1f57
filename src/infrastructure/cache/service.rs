//! Cache service trait and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::Country;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache of country records keyed by normalized country code.
///
/// Implementations are fail-open: a broken backend behaves like a permanent
/// miss so lookups fall through to the database.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached record, `Ok(None)` on miss or backend error.
    async fn get_country(&self, code: &str) -> CacheResult<Option<Country>>;

    /// Stores a record. `ttl_seconds = None` uses the implementation default.
    async fn set_country(&self, country: &Country, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Drops a record after it was updated or removed.
    async fn invalidate(&self, code: &str) -> CacheResult<()>;

    /// Used by the health endpoint.
    async fn health_check(&self) -> bool;

    /// Whether a real backend is configured.
    fn is_enabled(&self) -> bool {
        true
    }
}
