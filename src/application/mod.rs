//! Application layer services implementing business logic.
//!
//! Services consume repository traits, apply validation and keep the caches
//! coherent. HTTP handlers and the admin CLI only talk to this layer.
//!
//! # Available Services
//!
//! - [`services::country_service::CountryService`] - Country records CRUD
//! - [`services::containment_service::ContainmentService`] - Point-in-country checks
//! - [`services::auth_service::AuthService`] - API token issuing and authentication
//! - [`services::geometry_cache::GeometryCache`] - Parsed boundaries shared by the above
//!
//! [`import`] turns GeoJSON feature collections and the built-in sample set
//! into new country records for the admin CLI.

pub mod import;
pub mod services;
