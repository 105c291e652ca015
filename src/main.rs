// src/main.rs
use std::io;
use std::sync::Arc;
use std::time::Duration;
use std::{fs, thread};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod cli;
mod config;
mod geo;
mod input;
mod model;
mod refresh;
mod state;
mod ui;

use api::NewsClient;
use app::{App, AppEvent};
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing()?;

    let mut cfg = config::load_config();
    if let Some(topic) = args.topic {
        cfg.topic = topic;
    }
    if args.no_refresh {
        cfg.auto_refresh = false;
    }

    let api_key = config::api_key()?;
    let client = NewsClient::new(api_key)?;
    let mut app = App::new(cfg, client);

    // keyboard reader feeds the same channel as fetch results and timers
    let key_tx = app.event_sender();
    thread::spawn(move || loop {
        match event::poll(Duration::from_millis(200)) {
            Ok(true) => {
                if let Ok(Event::Key(key)) = event::read() {
                    if key_tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
            }
            Ok(false) => {
                if key_tx.is_closed() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    // once-a-second repaint for the clock and refresh countdown
    let tick_tx = app.event_sender();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_secs(1));
        loop {
            tick.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if result.is_ok() {
        if let Err(err) = config::save_config(&app.state.config) {
            info!(error = %err, "could not persist configuration");
        }
    }

    result
}

/// Logs go to a file so they never fight the terminal UI for the screen.
/// No data directory just means no logs.
fn init_tracing() -> Result<()> {
    let Some(path) = config::log_path() else {
        return Ok(());
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
