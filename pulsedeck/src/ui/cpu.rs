//! CPU gauge.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
};

use crate::types::MetricsSnapshot;

pub fn draw_cpu(f: &mut ratatui::Frame<'_>, area: Rect, m: Option<&MetricsSnapshot>) {
    let (pct, label) = match m {
        Some(mm) => (
            mm.cpu.total.clamp(0.0, 100.0) as u16,
            format!("{:.1}% · {} cores", mm.cpu.total, mm.cpu.per_core.len()),
        ),
        None => (0, "--".into()),
    };

    let g = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("CPU"))
        .gauge_style(Style::default().fg(Color::Blue))
        .percent(pct)
        .label(label);
    f.render_widget(g, area);
}
