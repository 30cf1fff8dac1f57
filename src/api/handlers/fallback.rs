//! Fallbacks for unknown routes and unsupported methods.

use axum::http::{Method, Uri};
use serde_json::json;

use crate::error::AppError;

/// `404` for paths no route matches, in the regular error envelope.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("Endpoint not found", json!({ "path": uri.path() }))
}

/// `405` for known paths requested with an unsupported method.
pub async fn method_not_allowed_handler(method: Method, uri: Uri) -> AppError {
    AppError::method_not_allowed(
        "Method not allowed",
        json!({ "method": method.as_str(), "path": uri.path() }),
    )
}
