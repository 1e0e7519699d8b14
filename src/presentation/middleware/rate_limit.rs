use crate::infrastructure::config::RateLimitConfig;
use axum::{body::Body, extract::ConnectInfo};
use governor::{clock::QuantaInstant, middleware::NoOpMiddleware};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, errors::GovernorError, governor::GovernorConfigBuilder,
    key_extractor::KeyExtractor,
};

/// Keys requests by peer IP, falling back to loopback when connection info
/// is absent (router driven directly in tests).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeerIpKeyExtractor;

impl KeyExtractor for PeerIpKeyExtractor {
    type Key = IpAddr;

    fn extract<B>(&self, req: &axum::http::Request<B>) -> Result<Self::Key, GovernorError> {
        Ok(req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)))
    }
}

pub type RateLimitLayer = GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body>;

/// Allow a burst of `requests` per client, refilled evenly over `window_secs`.
pub fn rate_limit_layer(config: &RateLimitConfig) -> anyhow::Result<RateLimitLayer> {
    if config.requests == 0 {
        return Err(anyhow::anyhow!("Rate limit must allow at least one request"));
    }
    let window_ms = config.window_secs.checked_mul(1000).ok_or_else(|| {
        anyhow::anyhow!("Rate limit window of {}s is too large", config.window_secs)
    })?;
    let replenish_ms = (window_ms / config.requests).max(1);
    let burst = u32::try_from(config.requests)
        .map_err(|_| anyhow::anyhow!("Rate limit of {} is too large", config.requests))?;

    let governor = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(replenish_ms)
            .burst_size(burst)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Failed to finish governor config"))?,
    );

    Ok(GovernorLayer::new(governor))
}
