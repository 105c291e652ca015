// src/ui/mod.rs
mod headlines;
mod map;
mod sources;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::model::capitalize;
use crate::refresh::CyclePhase;
use crate::state::ui_state::InputMode;
use crate::state::{Dashboard, Status};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // header / topic editor
            Constraint::Percentage(45), // charts
            Constraint::Min(8),     // headlines
            Constraint::Length(1),  // status bar
        ])
        .split(frame.size());

    draw_header(frame, app, chunks[0]);

    match &app.state.dashboard {
        Dashboard::Articles(table) => {
            let panels = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(chunks[1]);
            map::draw_hotspots(frame, table, panels[0]);
            sources::draw_top_sources(frame, table, panels[1]);
            headlines::draw_headlines(frame, app, chunks[2]);
        }
        _ => {
            // one message replaces both charts and the list
            let body = Rect {
                x: chunks[1].x,
                y: chunks[1].y,
                width: chunks[1].width,
                height: chunks[1].height + chunks[2].height,
            };
            draw_placeholder(frame, app, body);
        }
    }

    draw_status_bar(frame, app, chunks[3]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title("Live Global News & Events Tracker")
        .borders(Borders::ALL);

    if app.state.ui.input_mode == InputMode::EditingTopic {
        let input = &app.state.ui.topic_input;
        let prompt = "New topic: ";
        let line = Line::from(vec![
            Span::styled(prompt, Style::default().fg(Color::Gray)),
            Span::raw(input.value().to_string()),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);
        frame.set_cursor(
            area.x + 1 + prompt.len() as u16 + input.visual_cursor() as u16,
            area.y + 1,
        );
    } else {
        let line = Line::from(vec![
            Span::raw("Tracking Topic: "),
            Span::styled(
                format!("'{}'", capitalize(&app.state.display_topic)),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

fn draw_placeholder(frame: &mut Frame, app: &App, area: Rect) {
    frame.render_widget(Block::default().borders(Borders::ALL), area);

    let (message, style) = match &app.state.status {
        Status::Error(msg) => (msg.clone(), Style::default().fg(Color::Red)),
        Status::Warning(msg) => (msg.clone(), Style::default().fg(Color::Yellow)),
        _ => (
            "Fetching latest headlines…".to_string(),
            Style::default().fg(Color::Gray),
        ),
    };

    let popup = centered_rect(60, 20, area);
    frame.render_widget(
        Paragraph::new(message)
            .style(style.add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup,
    );
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(52)])
        .split(area);

    let (status_text, status_style) = match &app.state.status {
        Status::Loading => ("Loading…".to_string(), Style::default().fg(Color::Gray)),
        Status::Error(msg) => (msg.clone(), Style::default().fg(Color::Red)),
        Status::Warning(msg) => (msg.clone(), Style::default().fg(Color::Yellow)),
        Status::Updated(at) => (
            format!("Updated {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::Green),
        ),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(status_text, status_style)),
        chunks[0],
    );

    let refresh_label = match (app.state.phase, app.scheduler.seconds_remaining()) {
        (CyclePhase::Waiting, Some(secs)) => format!("auto-refresh in {secs}s"),
        (CyclePhase::Fetching, _) => "fetching…".to_string(),
        _ if !app.state.config.auto_refresh => "auto-refresh off".to_string(),
        _ => String::new(),
    };
    let hints = Line::from(vec![
        Span::styled(refresh_label, Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(
            "q quit · t topic · a auto · r refresh · ⏎ open",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(hints).alignment(Alignment::Right),
        chunks[1],
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
