//! Client configuration: stream endpoint and tuning knobs.

use std::time::Duration;

use url::Url;

/// Tunables for the streaming client. Defaults match the agent's cadence:
/// 1s..30s reconnect backoff, 500ms sparkline throttle, 20-sample window.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub min_retry_delay: Duration,
    pub max_retry_delay: Duration,
    pub throttle: Duration,
    pub window_capacity: usize,
    pub endpoint_path: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            min_retry_delay: Duration::from_millis(1000),
            max_retry_delay: Duration::from_millis(30_000),
            throttle: Duration::from_millis(500),
            window_capacity: 20,
            endpoint_path: "/api/stream".into(),
        }
    }
}

/// Build the full stream URL from a base like `ws://host:8080` and the
/// configured endpoint path.
pub fn stream_url(base: &str, path: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse(base)?;
    url.set_path(path);
    Ok(url.into())
}
