//! Business logic services for the application layer.

pub mod auth_service;
pub mod containment_service;
pub mod country_service;
pub mod geometry_cache;

pub use auth_service::AuthService;
pub use containment_service::{CheckOutcome, ContainmentService};
pub use country_service::CountryService;
pub use geometry_cache::GeometryCache;
