//! The serialized snapshot must carry the exact wire field names the
//! dashboard client deserializes.

use pulsedeck_agent::types::{
    CpuMetrics, LoadAvgMetrics, MetricsSnapshot, NetworkMetrics,
};
use serde_json::Value;

#[test]
fn snapshot_serializes_with_wire_field_names() {
    let snap = MetricsSnapshot {
        timestamp: 1724900000,
        hostname: "edge-01".into(),
        cpu: CpuMetrics {
            total: 12.5,
            per_core: vec![10.0, 15.0],
        },
        network: NetworkMetrics {
            bytes_recv: 1,
            bytes_sent: 2,
            rx_rate: 3.0,
            tx_rate: 4.0,
            is_spike: true,
        },
        load_average: LoadAvgMetrics {
            load1: 0.1,
            load5: 0.2,
            load15: 0.3,
        },
        ..MetricsSnapshot::default()
    };

    let v: Value = serde_json::to_value(&snap).unwrap();

    assert!(v.get("timestamp").is_some());
    assert!(v.get("hostname").is_some());
    assert!(v["cpu"].get("perCore").is_some());
    assert!(v["memory"].get("usedPercent").is_some());
    assert!(v["disk"].get("usedPercent").is_some());
    assert!(v["network"].get("bytesRecv").is_some());
    assert!(v["network"].get("bytesSent").is_some());
    assert!(v["network"].get("rxRate").is_some());
    assert!(v["network"].get("txRate").is_some());
    assert!(v["network"].get("isSpike").is_some());
    assert!(v["loadAverage"].get("load1").is_some());
    assert!(v["loadAverage"].get("load5").is_some());
    assert!(v["loadAverage"].get("load15").is_some());
    assert!(v.get("uptime").is_some());

    // no snake_case leaks
    assert!(v["cpu"].get("per_core").is_none());
    assert!(v["network"].get("bytes_recv").is_none());
    assert!(v.get("load_average").is_none());
}
