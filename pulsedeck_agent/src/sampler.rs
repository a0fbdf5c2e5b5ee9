//! Background sampler: collects on a fixed cadence and broadcasts each
//! serialized snapshot once, plus a periodic keep-alive token.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::warn;

use crate::metrics::Collector;
use crate::state::AppState;

pub const SAMPLE_PERIOD: Duration = Duration::from_millis(250);
pub const HEARTBEAT_PERIOD: Duration = Duration::from_secs(30);

/// Keep-alive token. Intentionally not JSON: clients drop it on decode.
pub const KEEPALIVE: &str = "ping";

pub fn spawn_sampler(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut collector = Collector::new();
        let mut tick = interval(SAMPLE_PERIOD);
        let mut heartbeat = interval(HEARTBEAT_PERIOD);
        loop {
            tokio::select! {
                _ = tick.tick() => {
                    // Skip collection while nobody is subscribed.
                    if state.subscriber_count() == 0 {
                        continue;
                    }
                    let snapshot = collector.collect();
                    match serde_json::to_string(&snapshot) {
                        Ok(json) => {
                            let _ = state.updates.send(json);
                        }
                        Err(e) => warn!("serialize snapshot: {e}"),
                    }
                }
                _ = heartbeat.tick() => {
                    if state.subscriber_count() > 0 {
                        let _ = state.updates.send(KEEPALIVE.to_string());
                    }
                }
            }
        }
    })
}
