//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Creates a rate limiter for the login endpoint.
///
/// # Limits
///
/// - **Replenish**: one request every 2 seconds
/// - **Burst**: 10 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/login", post(login_handler))
///     .layer(rate_limit::login_layer());
/// ```
pub fn login_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(10)
            .finish()
            .expect("rate limiter period and burst size are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates a rate limiter for authenticated endpoints.
///
/// # Limits
///
/// - **Replenish**: one request per second
/// - **Burst**: 100 requests
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(1)
            .burst_size(100)
            .finish()
            .expect("rate limiter period and burst size are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
