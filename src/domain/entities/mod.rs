//! Core domain entities.
//!
//! Entities are plain data structures without business logic. Creation and
//! partial-update inputs live in separate structs:
//! - [`Country`] - A stored country boundary
//! - [`NewCountry`] - For creating records
//! - [`UpdateCountry`] - For partial updates

pub mod country;

pub use country::{Country, NewCountry, UpdateCountry};
