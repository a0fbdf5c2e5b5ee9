//! Data types pushed to clients over the stream.
//! Keep this module minimal and stable — it defines the wire format.

use serde::Serialize;

#[derive(Debug, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CpuMetrics {
    pub total: f64,
    pub per_core: Vec<f64>,
}

#[derive(Debug, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MemoryMetrics {
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub used_percent: f64,
}

#[derive(Debug, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DiskMetrics {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub used_percent: f64,
}

#[derive(Debug, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetrics {
    // cumulative totals; clients diff or use the rates directly
    pub bytes_recv: u64,
    pub bytes_sent: u64,
    // bytes/sec since the previous collection
    pub rx_rate: f64,
    pub tx_rate: f64,
    pub is_spike: bool,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct LoadAvgMetrics {
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
}

#[derive(Debug, Serialize, Clone, Default)]
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
