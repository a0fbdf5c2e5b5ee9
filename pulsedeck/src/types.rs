//! Types that mirror the agent's JSON wire shape.
//!
//! One push payload is either a `MetricsSnapshot` or an opaque keep-alive
//! token. Anything that fails to parse, or parses with out-of-range values,
//! is dropped whole; a partial snapshot is never surfaced.

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CpuMetrics {
    /// Aggregate utilization percent (0..=100).
    pub total: f64,
    /// Per-core percents; may be empty on hosts that hide topology.
    pub per_core: Vec<f64>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MemoryMetrics {
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub used_percent: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DiskMetrics {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub used_percent: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetrics {
    // cumulative counters since host boot
    pub bytes_recv: u64,
    pub bytes_sent: u64,
    // instantaneous rates in bytes/sec
    pub rx_rate: f64,
    pub tx_rate: f64,
    pub is_spike: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoadAvgMetrics {
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub timestamp: i64,
    pub hostname: String,
    pub cpu: CpuMetrics,
    pub memory: MemoryMetrics,
    pub disk: DiskMetrics,
    pub network: NetworkMetrics,
    pub load_average: LoadAvgMetrics,
    pub uptime: u64,
}

fn percent_ok(v: f64) -> bool {
    v.is_finite() && (0.0..=100.0).contains(&v)
}

fn non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

impl MetricsSnapshot {
    /// Shape invariants: percents in [0,100], rates and loads non-negative.
    pub fn is_well_formed(&self) -> bool {
        percent_ok(self.cpu.total)
            && self.cpu.per_core.iter().copied().all(percent_ok)
            && percent_ok(self.memory.used_percent)
            && percent_ok(self.disk.used_percent)
            && non_negative(self.network.rx_rate)
            && non_negative(self.network.tx_rate)
            && non_negative(self.load_average.load1)
            && non_negative(self.load_average.load5)
            && non_negative(self.load_average.load15)
    }
}

/// Decode one push payload. Keep-alive tokens and malformed snapshots yield
/// `None`; they are not errors.
pub fn decode_snapshot(payload: &str) -> Option<MetricsSnapshot> {
    serde_json::from_str::<MetricsSnapshot>(payload)
        .ok()
        .filter(|s| s.is_well_formed())
}
