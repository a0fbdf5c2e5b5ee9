//! Rolling throughput window: a throttled, fixed-capacity FIFO of combined
//! network-rate samples backing the sparkline.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::types::MetricsSnapshot;

/// One sparkline point: combined rx+tx throughput in KB/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingSample {
    pub value: f64,
}

pub struct RollingWindow {
    samples: VecDeque<RollingSample>,
    cap: usize,
    throttle: Duration,
    last_sample: Option<Instant>,
}

impl RollingWindow {
    pub fn new(cap: usize, throttle: Duration) -> Self {
        let cap = cap.max(1);
        Self {
            samples: VecDeque::with_capacity(cap),
            cap,
            throttle,
            last_sample: None,
        }
    }

    /// Feed one accepted snapshot. A snapshot arriving within the throttle
    /// interval of the last recorded sample is skipped outright, so the
    /// window advances at most once per interval no matter how fast the
    /// stream pushes.
    pub fn on_snapshot(&mut self, snap: &MetricsSnapshot, now: Instant) {
        if let Some(last) = self.last_sample {
            if now.duration_since(last) < self.throttle {
                return;
            }
        }
        self.last_sample = Some(now);
        let total_rate = snap.network.rx_rate + snap.network.tx_rate;
        push_capped(
            &mut self.samples,
            RollingSample {
                value: total_rate / 1024.0,
            },
            self.cap,
        );
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RollingSample> {
        self.samples.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// View for rendering, oldest first. Under 3 samples the chart gets a
    /// flat 3-point zero line instead of a degenerate sequence.
    pub fn render_view(&self) -> Vec<RollingSample> {
        if self.samples.len() < 3 {
            vec![RollingSample { value: 0.0 }; 3]
        } else {
            self.samples.iter().copied().collect()
        }
    }
}

/// Append with FIFO eviction once `cap` is reached.
pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    while dq.len() >= cap {
        dq.pop_front();
    }
    dq.push_back(v);
}
