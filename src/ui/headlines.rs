// src/ui/headlines.rs
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::app::App;
use crate::state::Dashboard;

pub fn draw_headlines(frame: &mut Frame, app: &App, area: Rect) {
    let Dashboard::Articles(table) = &app.state.dashboard else {
        return;
    };

    let rule_width = (area.width as usize).saturating_sub(4).min(80);
    let items: Vec<ListItem> = table
        .rows
        .iter()
        .map(|row| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    row.article.title.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled(
                        row.article.source_name.clone(),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(" - "),
                    Span::styled(
                        row.article.published_label(),
                        Style::default().fg(Color::Gray),
                    ),
                ]),
                Line::from(Span::styled(
                    "─".repeat(rule_width),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Latest Headlines")
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("► ");

    frame.render_stateful_widget(list, area, &mut app.state.ui.headline_list_state.clone());
}
