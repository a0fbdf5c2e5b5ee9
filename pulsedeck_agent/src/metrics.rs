//! Host metrics collection over persistent sysinfo handles.

use std::path::Path;
use std::time::Instant;

use sysinfo::{Disks, Networks, System};

use crate::types::{
    CpuMetrics, DiskMetrics, LoadAvgMetrics, MemoryMetrics, MetricsSnapshot, NetworkMetrics,
};

/// Rate above which a snapshot is flagged as a traffic spike (10 MiB/s).
pub const SPIKE_THRESHOLD: f64 = 10.0 * 1024.0 * 1024.0;

pub struct Collector {
    sys: System,
    networks: Networks,
    disks: Disks,
    // previous cumulative totals, for rate derivation
    last_totals: Option<(u64, u64, Instant)>,
}

impl Collector {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self {
            sys,
            networks: Networks::new_with_refreshed_list(),
            disks: Disks::new_with_refreshed_list(),
            last_totals: None,
        }
    }

    pub fn collect(&mut self) -> MetricsSnapshot {
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();
        self.networks.refresh();
        self.disks.refresh();

        // sysinfo can report a hair above 100 on busy cores; clamp so the
        // published percents stay inside the wire contract.
        let cpu = CpuMetrics {
            total: f64::from(self.sys.global_cpu_usage()).clamp(0.0, 100.0),
            per_core: self
                .sys
                .cpus()
                .iter()
                .map(|c| f64::from(c.cpu_usage()).clamp(0.0, 100.0))
                .collect(),
        };

        let mem_total = self.sys.total_memory();
        let mem_used = self.sys.used_memory();
        let memory = MemoryMetrics {
            total: mem_total,
            used: mem_used,
            available: self.sys.available_memory(),
            used_percent: pct(mem_used, mem_total),
        };

        let disk = self.root_disk();
        let network = self.network(Instant::now());

        let load = System::load_average();

        MetricsSnapshot {
            timestamp: chrono::Utc::now().timestamp(),
            hostname: System::host_name().unwrap_or_else(|| "unknown".into()),
            cpu,
            memory,
            disk,
            network,
            load_average: LoadAvgMetrics {
                load1: load.one,
                load5: load.five,
                load15: load.fifteen,
            },
            uptime: System::uptime(),
        }
    }

    // Prefer the filesystem mounted at /, fall back to the largest disk.
    fn root_disk(&self) -> DiskMetrics {
        let pick = self
            .disks
            .list()
            .iter()
            .find(|d| d.mount_point() == Path::new("/"))
            .or_else(|| self.disks.list().iter().max_by_key(|d| d.total_space()));
        match pick {
            Some(d) => {
                let total = d.total_space();
                let free = d.available_space();
                let used = total.saturating_sub(free);
                DiskMetrics {
                    total,
                    used,
                    free,
                    used_percent: pct(used, total),
                }
            }
            None => DiskMetrics::default(),
        }
    }

    fn network(&mut self, now: Instant) -> NetworkMetrics {
        let rx_total: u64 = self.networks.iter().map(|(_, d)| d.total_received()).sum();
        let tx_total: u64 = self
            .networks
            .iter()
            .map(|(_, d)| d.total_transmitted())
            .sum();

        // First collection has no baseline and reports zero rates.
        let (rx_rate, tx_rate, is_spike) = match self.last_totals {
            Some((prev_rx, prev_tx, at)) => rates(
                rx_total.saturating_sub(prev_rx),
                tx_total.saturating_sub(prev_tx),
                now.duration_since(at).as_secs_f64(),
            ),
            None => (0.0, 0.0, false),
        };
        self.last_totals = Some((rx_total, tx_total, now));

        NetworkMetrics {
            bytes_recv: rx_total,
            bytes_sent: tx_total,
            rx_rate,
            tx_rate,
            is_spike,
        }
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

/// Instantaneous rates plus the spike flag, from byte deltas over `dt` seconds.
pub fn rates(rx_delta: u64, tx_delta: u64, dt_secs: f64) -> (f64, f64, bool) {
    if dt_secs <= 0.0 {
        return (0.0, 0.0, false);
    }
    let rx = rx_delta as f64 / dt_secs;
    let tx = tx_delta as f64 / dt_secs;
    (rx, tx, rx > SPIKE_THRESHOLD || tx > SPIKE_THRESHOLD)
}

fn pct(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    }
}
