//! Memory gauge.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
};

use crate::types::MetricsSnapshot;
use crate::ui::util::human;

pub fn draw_mem(f: &mut ratatui::Frame<'_>, area: Rect, m: Option<&MetricsSnapshot>) {
    let (pct, label) = match m {
        Some(mm) => (
            mm.memory.used_percent.clamp(0.0, 100.0) as u16,
            format!("{} / {}", human(mm.memory.used), human(mm.memory.total)),
        ),
        None => (0, "--".into()),
    };

    let g = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Memory"))
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(pct)
        .label(label);
    f.render_widget(g, area);
}
