// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use std::sync::OnceLock;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

// One request is replenished every period, not per second.
const LOGIN_REPLENISH_PERIOD_SECONDS: u64 = 2;
const LOGIN_BURST: u32 = 5;

/// Per-client throttle for the sign-in route. Keys on forwarding headers
/// first, then the peer address.
pub fn login_rate_limit_layer() -> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body> {
    static LOGIN_LIMITER: OnceLock<GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>> =
        OnceLock::new();

    LOGIN_LIMITER
        .get_or_init(|| {
            let mut builder = GovernorConfigBuilder::default();
            builder.per_second(LOGIN_REPLENISH_PERIOD_SECONDS);
            builder.burst_size(LOGIN_BURST);
            let config = builder
                .key_extractor(SmartIpKeyExtractor)
                .finish()
                .expect("valid login rate limit configuration");

            GovernorLayer::new(config)
        })
        .clone()
}
