//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Requires a valid `Authorization: Bearer <token>` header.
///
/// The token is checked by [`crate::application::services::AuthService`],
/// which also stamps its `last_used_at`. Missing, malformed, unknown or revoked
/// tokens yield `401 Unauthorized` with `WWW-Authenticate: Bearer`.
///
/// Applied with `route_layer` to the country write routes only.
///
/// # Example
///
/// ```rust,ignore
/// let writes = api::routes::protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) if !token.trim().is_empty() => token,
        _ => {
            tracing::debug!(path = %parts.uri.path(), "Rejected request without bearer token");
            return Err(AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            ));
        }
    };

    state.auth_service.authenticate(token.trim()).await?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}
