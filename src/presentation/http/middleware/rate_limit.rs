// src/presentation/http/middleware/rate_limit.rs
use crate::config::RateLimit;
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

pub type CustomerRateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// `None` when the limits cannot form a bucket (zero period or burst).
pub fn rate_limit_layer(limit: RateLimit) -> Option<CustomerRateLimitLayer> {
    let mut builder = GovernorConfigBuilder::default();
    builder.per_second(limit.per_second);
    builder.burst_size(limit.burst);
    let Some(config) = builder.key_extractor(SmartIpKeyExtractor).finish() else {
        tracing::warn!(?limit, "invalid rate limit; customer routes are not limited");
        return None;
    };
    Some(GovernorLayer::new(config))
}
