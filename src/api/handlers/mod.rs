//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod check;
pub mod countries;
pub mod fallback;
pub mod health;

pub use check::check_handler;
pub use countries::{
    country_handler, country_list_handler, create_country_handler, delete_country_handler,
    update_country_handler,
};
pub use fallback::{method_not_allowed_handler, not_found_handler};
pub use health::health_handler;
