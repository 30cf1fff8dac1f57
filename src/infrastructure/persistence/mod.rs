//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow`.
//!
//! # Repositories
//!
//! - [`PgCountryRepository`] - Country boundary records
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_country_repository;
pub mod pg_token_repository;

pub use pg_country_repository::PgCountryRepository;
pub use pg_token_repository::PgTokenRepository;
