//! Connection manager state machine: backoff escalation, reset on open,
//! stop/replace semantics, and feed updates. Runs on tokio's paused clock
//! so scheduled delays are observed exactly.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pulsedeck::config::StreamConfig;
use pulsedeck::conn::{ConnectionManager, Phase};
use pulsedeck::transport::{StreamConn, StreamTransport, TransportError};
use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};

const VALID: &str = r#"{
    "timestamp": 1724900000,
    "hostname": "edge-01",
    "cpu": { "total": 12.5, "perCore": [10.0, 15.0] },
    "memory": { "total": 8589934592, "used": 4294967296, "available": 4294967296, "usedPercent": 50.0 },
    "disk": { "total": 512000000000, "used": 128000000000, "free": 384000000000, "usedPercent": 25.0 },
    "network": { "bytesRecv": 123456789, "bytesSent": 987654321, "rxRate": 2048.0, "txRate": 1024.0, "isSpike": false },
    "loadAverage": { "load1": 0.42, "load5": 0.38, "load15": 0.31 },
    "uptime": 360000
}"#;

fn deltas(at: &[Instant]) -> Vec<u64> {
    at.windows(2)
        .map(|w| (w[1] - w[0]).as_millis() as u64)
        .collect()
}

/// Transport whose connect attempt always fails.
#[derive(Default)]
struct RefusedTransport {
    attempts: Mutex<Vec<Instant>>,
}

#[async_trait]
impl StreamTransport for RefusedTransport {
    async fn open(&self) -> Result<Box<dyn StreamConn>, TransportError> {
        self.attempts.lock().unwrap().push(Instant::now());
        Err(TransportError::Connect("connection refused".into()))
    }
}

/// Transport that opens fine but whose session dies on the first read.
#[derive(Default)]
struct FlakyTransport {
    attempts: Mutex<Vec<Instant>>,
}

struct FlakyConn;

#[async_trait]
impl StreamConn for FlakyConn {
    async fn next_payload(&mut self) -> Result<Option<String>, TransportError> {
        Err(TransportError::Stream("dropped".into()))
    }
    async fn close(&mut self) {}
}

#[async_trait]
impl StreamTransport for FlakyTransport {
    async fn open(&self) -> Result<Box<dyn StreamConn>, TransportError> {
        self.attempts.lock().unwrap().push(Instant::now());
        Ok(Box::new(FlakyConn))
    }
}

/// Transport that opens and then stays silent forever.
#[derive(Default)]
struct SilentTransport {
    opens: Mutex<usize>,
}

struct SilentConn;

#[async_trait]
impl StreamConn for SilentConn {
    async fn next_payload(&mut self) -> Result<Option<String>, TransportError> {
        std::future::pending().await
    }
    async fn close(&mut self) {}
}

#[async_trait]
impl StreamTransport for SilentTransport {
    async fn open(&self) -> Result<Box<dyn StreamConn>, TransportError> {
        *self.opens.lock().unwrap() += 1;
        Ok(Box::new(SilentConn))
    }
}

type Event = Result<Option<String>, TransportError>;

/// Transport driven by the test: one session served from a channel.
struct ScriptedTransport {
    rx: Mutex<Option<mpsc::UnboundedReceiver<Event>>>,
}

struct ScriptedConn {
    rx: mpsc::UnboundedReceiver<Event>,
}

#[async_trait]
impl StreamConn for ScriptedConn {
    async fn next_payload(&mut self) -> Result<Option<String>, TransportError> {
        match self.rx.recv().await {
            Some(ev) => ev,
            None => Ok(None),
        }
    }
    async fn close(&mut self) {}
}

#[async_trait]
impl StreamTransport for ScriptedTransport {
    async fn open(&self) -> Result<Box<dyn StreamConn>, TransportError> {
        let session = self.rx.lock().unwrap().take();
        match session {
            Some(rx) => Ok(Box::new(ScriptedConn { rx })),
            None => Err(TransportError::Connect("no more sessions".into())),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn consecutive_failures_escalate_to_the_cap() {
    let transport = Arc::new(RefusedTransport::default());
    let cfg = StreamConfig {
        max_retry_delay: Duration::from_millis(4000),
        ..StreamConfig::default()
    };
    let mut mgr = ConnectionManager::new(transport.clone(), cfg);
    mgr.start();

    // attempts land at t = 0, 1000, 3000, 7000, 11000
    sleep(Duration::from_millis(11_500)).await;
    mgr.stop();

    let attempts = transport.attempts.lock().unwrap().clone();
    assert_eq!(deltas(&attempts), vec![1000, 2000, 4000, 4000]);
}

#[tokio::test(start_paused = true)]
async fn first_three_delays_are_one_two_four_seconds() {
    let transport = Arc::new(RefusedTransport::default());
    let mut mgr = ConnectionManager::new(transport.clone(), StreamConfig::default());
    mgr.start();

    sleep(Duration::from_millis(7_500)).await;
    mgr.stop();

    let attempts = transport.attempts.lock().unwrap().clone();
    assert_eq!(deltas(&attempts), vec![1000, 2000, 4000]);
}

#[tokio::test(start_paused = true)]
async fn open_resets_backoff_to_minimum() {
    let transport = Arc::new(FlakyTransport::default());
    let mut mgr = ConnectionManager::new(transport.clone(), StreamConfig::default());
    mgr.start();

    // Every attempt opens before it dies, so the delay never escalates.
    sleep(Duration::from_millis(5_500)).await;
    mgr.stop();

    let attempts = transport.attempts.lock().unwrap().clone();
    assert_eq!(deltas(&attempts), vec![1000; 5]);
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_a_pending_reconnect() {
    let transport = Arc::new(RefusedTransport::default());
    let mut mgr = ConnectionManager::new(transport.clone(), StreamConfig::default());
    let feed = mgr.subscribe();
    mgr.start();

    sleep(Duration::from_millis(100)).await;
    assert_eq!(transport.attempts.lock().unwrap().len(), 1);
    mgr.stop();

    sleep(Duration::from_secs(120)).await;
    assert_eq!(
        transport.attempts.lock().unwrap().len(),
        1,
        "no subscription may be opened after stop"
    );
    assert!(!feed.borrow().connected);
}

#[tokio::test(start_paused = true)]
async fn start_twice_replaces_the_subscription() {
    let transport = Arc::new(SilentTransport::default());
    let mut mgr = ConnectionManager::new(transport.clone(), StreamConfig::default());
    let feed = mgr.subscribe();
    mgr.start();
    sleep(Duration::from_millis(10)).await;
    assert_eq!(*transport.opens.lock().unwrap(), 1);

    mgr.start();
    sleep(Duration::from_millis(10)).await;
    assert_eq!(*transport.opens.lock().unwrap(), 2);

    // Exactly one subscription stays live; the replaced one never reopens.
    sleep(Duration::from_secs(60)).await;
    assert_eq!(*transport.opens.lock().unwrap(), 2);
    assert!(feed.borrow().connected);
    mgr.stop();
}

#[tokio::test(start_paused = true)]
async fn snapshots_flow_and_noise_is_ignored() {
    let (tx, rx) = mpsc::unbounded_channel::<Event>();
    let transport = Arc::new(ScriptedTransport {
        rx: Mutex::new(Some(rx)),
    });
    let mut mgr = ConnectionManager::new(transport, StreamConfig::default());
    let feed = mgr.subscribe();
    mgr.start();

    sleep(Duration::from_millis(10)).await;
    {
        let f = feed.borrow();
        assert_eq!(f.phase, Phase::Open);
        assert!(f.connected);
        assert!(f.latest.is_none());
    }

    tx.send(Ok(Some(VALID.to_string()))).unwrap();
    sleep(Duration::from_millis(10)).await;
    {
        let f = feed.borrow();
        assert_eq!(f.seq, 1);
        assert_eq!(f.latest.as_ref().unwrap().hostname, "edge-01");
    }

    // Keep-alive and malformed payloads leave the feed untouched.
    tx.send(Ok(Some("ping".to_string()))).unwrap();
    tx.send(Ok(Some("{not json".to_string()))).unwrap();
    sleep(Duration::from_millis(10)).await;
    {
        let f = feed.borrow();
        assert_eq!(f.seq, 1);
        assert!(f.connected);
    }

    // A transport fault flips the liveness flag but keeps the snapshot.
    tx.send(Err(TransportError::Stream("dropped".into()))).unwrap();
    sleep(Duration::from_millis(10)).await;
    {
        let f = feed.borrow();
        assert!(!f.connected);
        assert_eq!(f.phase, Phase::ClosedRetrying);
        assert!(f.latest.is_some(), "last snapshot survives a disconnect");
    }
    mgr.stop();
}
