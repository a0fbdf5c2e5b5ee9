//! Top header with hostname, uptime, load averages and the liveness dot.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

use crate::conn::{Feed, Phase};
use crate::ui::util::format_uptime;

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, feed: &Feed) {
    let status = match feed.phase {
        Phase::Open => "● live",
        Phase::Connecting => "○ connecting...",
        Phase::ClosedRetrying => "○ retrying...",
    };
    let title = if let Some(m) = feed.latest.as_ref() {
        format!(
            "pulsedeck — host: {} | up {} | load {:.2} {:.2} {:.2} | {}  (press 'q' to quit)",
            m.hostname,
            format_uptime(m.uptime),
            m.load_average.load1,
            m.load_average.load5,
            m.load_average.load15,
            status
        )
    } else {
        format!("pulsedeck — {}  (press 'q' to quit)", status)
    };
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
