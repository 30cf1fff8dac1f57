//! Domain layer: the geometry engine, entities and repository contracts.
//!
//! # Architecture
//!
//! - [`geometry`] - Pure point-in-boundary engine (no I/O, no shared state)
//! - [`entities`] - Country record data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits are implemented in [`crate::infrastructure`];
//! orchestration lives in [`crate::application::services`].

pub mod entities;
pub mod geometry;
pub mod repositories;
