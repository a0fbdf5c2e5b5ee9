//! Connection manager: keeps exactly one subscription to the push stream
//! alive, self-healing with exponential backoff, and publishes the latest
//! accepted snapshot plus a liveness flag through a watch channel.
//!
//! Single-writer, many-reader: only the driver task mutates the published
//! [`Feed`]; the presentation layer holds receiver clones.

use std::sync::Arc;

use tokio::{sync::watch, task::JoinHandle, time::sleep};

use crate::config::StreamConfig;
use crate::transport::StreamTransport;
use crate::types::{decode_snapshot, MetricsSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Connecting,
    Open,
    ClosedRetrying,
}

/// Client-observable connection state.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    pub phase: Phase,
    pub connected: bool,
    /// Most recently accepted snapshot; `None` before the first message.
    pub latest: Option<MetricsSnapshot>,
    /// Count of accepted snapshots, so observers can tell a fresh snapshot
    /// from an unrelated phase change.
    pub seq: u64,
}

pub struct ConnectionManager {
    transport: Arc<dyn StreamTransport>,
    cfg: StreamConfig,
    tx: watch::Sender<Feed>,
    task: Option<JoinHandle<()>>,
}

impl ConnectionManager {
    pub fn new(transport: Arc<dyn StreamTransport>, cfg: StreamConfig) -> Self {
        let (tx, _) = watch::channel(Feed::default());
        Self {
            transport,
            cfg,
            tx,
            task: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Feed> {
        self.tx.subscribe()
    }

    /// Idempotent. Calling it on a running manager replaces the prior
    /// subscription instead of stacking a duplicate one.
    pub fn start(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        let transport = Arc::clone(&self.transport);
        let cfg = self.cfg.clone();
        let tx = self.tx.clone();
        self.task = Some(tokio::spawn(run_stream(transport, cfg, tx)));
    }

    /// Tears the subscription down and cancels any pending scheduled
    /// reconnect. Aborting the driver task drops both the live connection
    /// (closing the socket) and the backoff sleep.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.tx.send_modify(|f| f.connected = false);
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_stream(
    transport: Arc<dyn StreamTransport>,
    cfg: StreamConfig,
    tx: watch::Sender<Feed>,
) {
    let mut retry = cfg.min_retry_delay;
    loop {
        tx.send_modify(|f| f.phase = Phase::Connecting);
        if let Ok(mut conn) = transport.open().await {
            // A healthy session resets the backoff; only consecutive
            // failures escalate it.
            retry = cfg.min_retry_delay;
            tx.send_modify(|f| {
                f.phase = Phase::Open;
                f.connected = true;
            });
            loop {
                match conn.next_payload().await {
                    Ok(Some(payload)) => {
                        // Keep-alive tokens and malformed snapshots decode
                        // to None and leave the feed untouched.
                        if let Some(snap) = decode_snapshot(&payload) {
                            tx.send_modify(|f| {
                                f.latest = Some(snap);
                                f.seq += 1;
                            });
                        }
                    }
                    Ok(None) | Err(_) => break,
                }
            }
            conn.close().await;
        }
        tx.send_modify(|f| {
            f.phase = Phase::ClosedRetrying;
            f.connected = false;
        });
        sleep(retry).await;
        // Double for the next attempt, capped, so repeated failures degrade
        // to polling at the cap rather than hot-looping. Retrying never
        // gives up: a monitoring client must eventually recover.
        retry = (retry * 2).min(cfg.max_retry_delay);
    }
}
