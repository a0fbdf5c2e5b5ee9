//! Network throughput sparkline fed by the rolling window.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Sparkline},
};

use crate::types::MetricsSnapshot;
use crate::ui::util::human;
use crate::window::RollingSample;

pub fn draw_net(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    m: Option<&MetricsSnapshot>,
    view: &[RollingSample],
) {
    let max_points = area.width.saturating_sub(2) as usize;
    let start = view.len().saturating_sub(max_points);
    let data: Vec<u64> = view[start..]
        .iter()
        .map(|s| s.value.max(0.0).round() as u64)
        .collect();

    let title = match m {
        Some(mm) => {
            let total = mm.network.rx_rate + mm.network.tx_rate;
            let spike = if mm.network.is_spike { "  ⚡ spike" } else { "" };
            format!(
                "Network {}/s (↓ {}/s · ↑ {}/s){}",
                human(total as u64),
                human(mm.network.rx_rate as u64),
                human(mm.network.tx_rate as u64),
                spike
            )
        }
        None => "Network".into(),
    };

    let spark = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(&data)
        .style(Style::default().fg(Color::Green));
    f.render_widget(spark, area);
}
