//! Per-client rate limiting using the token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Replenish interval and burst size of a token bucket.
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    /// One request is replenished every `replenish_ms` milliseconds.
    pub replenish_ms: u64,
    pub burst: u32,
}

/// Read-only endpoints: country lookups and containment checks.
///
/// One request every 50 ms with a burst of 200, enough for a client
/// geocoding a batch of points.
pub const PUBLIC: RateLimit = RateLimit {
    replenish_ms: 50,
    burst: 200,
};

/// Token-protected write endpoints: one request per second, burst of 10.
pub const SECURE: RateLimit = RateLimit {
    replenish_ms: 1000,
    burst: 10,
};

/// Applies `limit` per client IP to every route of `router`.
///
/// With `behind_proxy` the client IP is read from `X-Forwarded-For`,
/// `X-Real-IP` or `Forwarded`, falling back to the peer address. Otherwise
/// only the socket peer address is used, so the server must be served with
/// `into_make_service_with_connect_info`.
///
/// Requests over the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let writes = rate_limit::apply(api::routes::protected_routes(), rate_limit::SECURE, false);
/// ```
pub fn apply<S>(router: Router<S>, limit: RateLimit, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        router.layer(layer(SmartIpKeyExtractor, limit))
    } else {
        router.layer(layer(PeerIpKeyExtractor, limit))
    }
}

fn layer<K: KeyExtractor>(
    extractor: K,
    limit: RateLimit,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(extractor)
            .per_millisecond(limit.replenish_ms)
            .burst_size(limit.burst)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
