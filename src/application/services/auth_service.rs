//! Bearer token issuing and verification for the country write endpoints.

use hmac::{Hmac, Mac};
use rand::Rng;
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::repositories::{ApiToken, TokenRepository};
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Length of generated raw tokens.
pub const TOKEN_LENGTH: usize = 48;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// HMAC-SHA256 of `token` keyed by `signing_secret`, hex-encoded (64 chars).
///
/// The admin CLI and the HTTP middleware must agree on this function, so both
/// go through it.
pub fn hash_token(signing_secret: &str, token: &str) -> String {
    // HMAC takes keys of any length; this never fails.
    let mut mac = match HmacSha256::new_from_slice(signing_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC accepts any key length"),
    };
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Generates a random alphanumeric token of [`TOKEN_LENGTH`] characters.
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LENGTH)
        .map(|_| TOKEN_CHARSET[rng.random_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

/// Service for issuing, revoking and checking API tokens.
///
/// Only the keyed hash of a token is stored, so a read-only copy of the
/// database cannot be used to forge requests without `TOKEN_SIGNING_SECRET`.
pub struct AuthService<R: TokenRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository> AuthService<R> {
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Verifies a raw token and records its use.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<(), AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        if !self.repository.validate_token(&token_hash).await? {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        }

        // Bookkeeping only; a failure here must not reject the request.
        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, "Failed to record token use");
        }

        Ok(())
    }

    /// Stores a token under `name`. A random one is generated when `raw` is `None`.
    ///
    /// Returns the stored record together with the raw token, which is not
    /// recoverable afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is blank.
    /// Returns [`AppError::Conflict`] if the same token already exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn issue_token(
        &self,
        name: &str,
        raw: Option<String>,
    ) -> Result<(ApiToken, String), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::bad_request(
                "Token name must not be empty",
                json!({"field": "name"}),
            ));
        }

        let raw = raw.unwrap_or_else(generate_token);
        let token_hash = hash_token(&self.signing_secret, &raw);
        let stored = self.repository.create_token(name, &token_hash).await?;

        tracing::info!(token_id = stored.id, name = %stored.name, "API token issued");
        Ok((stored, raw))
    }

    /// Lists all tokens.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        self.repository.list_tokens().await
    }

    /// Revokes a token identified by numeric id or by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no such token exists or it is already revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn revoke_token(&self, id_or_name: &str) -> Result<ApiToken, AppError> {
        let found = match id_or_name.parse::<i64>() {
            Ok(id) => self.repository.find_by_id(id).await?,
            Err(_) => self.repository.find_by_name(id_or_name).await?,
        };

        let token = found
            .filter(|t| !t.is_revoked())
            .ok_or_else(|| AppError::not_found("Token not found", json!({"token": id_or_name})))?;

        self.repository.revoke_token(token.id).await?;
        tracing::info!(token_id = token.id, name = %token.name, "API token revoked");

        Ok(token)
    }
}
