// src/ui/sources.rs
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{BarChart, Block, Borders},
    Frame,
};

use crate::model::{ArticleTable, MAX_TOP_SOURCES};

pub fn draw_top_sources(frame: &mut Frame, table: &ArticleTable, area: Rect) {
    let top = table.top_sources(MAX_TOP_SOURCES);
    let bars: Vec<(&str, u64)> = top
        .iter()
        .map(|entry| (entry.source.as_str(), entry.count as u64))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Top News Sources")
                .borders(Borders::ALL),
        )
        .data(&bars)
        .bar_width(9)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .label_style(Style::default().fg(Color::Gray));

    frame.render_widget(chart, area);
}
