//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`CountryRepository`] - Country boundary records
//! - [`TokenRepository`] - API token authentication
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod country_repository;
pub mod token_repository;

pub use country_repository::CountryRepository;
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use country_repository::MockCountryRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
