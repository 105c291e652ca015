// src/ui/map.rs
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Block, Borders,
    },
    Frame,
};

use crate::geo;
use crate::model::ArticleTable;

/// Plasma-like sequential ramp, dark purple to bright yellow.
const HEAT_RAMP: [Color; 5] = [
    Color::Rgb(13, 8, 135),
    Color::Rgb(126, 3, 168),
    Color::Rgb(204, 71, 120),
    Color::Rgb(248, 149, 64),
    Color::Rgb(240, 249, 33),
];

pub fn draw_hotspots(frame: &mut Frame, table: &ArticleTable, area: Rect) {
    let counts = table.country_counts();
    let max = counts.iter().map(|c| c.count).max().unwrap_or(1);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title("News Hotspots by Source")
                .borders(Borders::ALL),
        )
        .marker(ratatui::symbols::Marker::Braille)
        .x_bounds([-180.0, 180.0])
        .y_bounds([-90.0, 90.0])
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            for entry in &counts {
                // derived "countries" the table doesn't recognize are
                // silently left off the map
                if let Some((lat, lon)) = geo::centroid(&entry.country) {
                    let style = Style::default().fg(heat_color(entry.count, max));
                    ctx.print(lon, lat, Line::styled(format!("● {}", entry.count), style));
                }
            }
        });

    frame.render_widget(canvas, area);
}

fn heat_color(count: usize, max: usize) -> Color {
    let last = HEAT_RAMP.len() - 1;
    let idx = if max <= 1 {
        last
    } else {
        (count.saturating_sub(1)) * last / (max - 1)
    };
    HEAT_RAMP[idx.min(last)]
}
