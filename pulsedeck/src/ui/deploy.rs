//! Decorative deployment-log panel: fixed-cadence playback of a canned
//! script. Pure playback with no failure modes and no dependency on the
//! metrics stream.

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const SCRIPT: [&str; 10] = [
    "Initializing handshake with server...",
    "Loading Terraform state...",
    "Provisioning AWS resources [EC2 t3.micro]...",
    "Connecting via SSH...",
    "Ansible playbook started...",
    "Installing Nginx web server...",
    "Copying application artifacts...",
    "Configuring firewall rules...",
    "System health check: PASSED",
    "Deployment successful!",
];

const STEP: Duration = Duration::from_millis(800);

pub struct DeployLog {
    started: Instant,
    entries: Vec<(String, &'static str)>,
}

impl DeployLog {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            entries: Vec::new(),
        }
    }

    /// Release every line whose cadence slot has elapsed, stamping it with
    /// the wall-clock time of release.
    pub fn tick(&mut self, now: Instant) {
        while self.entries.len() < SCRIPT.len()
            && now.duration_since(self.started) >= STEP * self.entries.len() as u32
        {
            let stamp = chrono::Local::now().format("%H:%M:%S").to_string();
            self.entries.push((stamp, SCRIPT[self.entries.len()]));
        }
    }

    pub fn entries(&self) -> &[(String, &'static str)] {
        &self.entries
    }

    pub fn done(&self) -> bool {
        self.entries.len() == SCRIPT.len()
    }
}

impl Default for DeployLog {
    fn default() -> Self {
        Self::new()
    }
}

pub fn draw_deploy(f: &mut ratatui::Frame<'_>, area: Rect, log: &DeployLog) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = log.entries().len().saturating_sub(visible);

    let lines: Vec<Line> = if log.entries().is_empty() {
        vec![Line::from(Span::styled(
            "Waiting for logs...",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        log.entries()[start..]
            .iter()
            .map(|(stamp, text)| {
                let style = if text.contains("PASSED") || text.ends_with("successful!") {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(format!("[{stamp}] "), Style::default().fg(Color::DarkGray)),
                    Span::styled(*text, style),
                ])
            })
            .collect()
    };

    let status = if log.done() { "ONLINE" } else { "DEPLOYING" };
    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("System Deployment — {status}")),
    );
    f.render_widget(p, area);
}
