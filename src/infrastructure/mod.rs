//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`cache`] - Country record caching (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod persistence;
