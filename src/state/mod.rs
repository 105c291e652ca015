// src/state/mod.rs
pub mod ui_state;

use chrono::{DateTime, Local};

use crate::config::AppConfig;
use crate::model::ArticleTable;
use crate::refresh::CyclePhase;
use crate::state::ui_state::UiState;

/// What the main area is currently showing. A failed or empty cycle
/// replaces whatever was on screen before; stale articles are never left
/// up next to an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Dashboard {
    /// First cycle still in flight; nothing to show yet.
    Loading,
    Articles(ArticleTable),
    NoArticles,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Loading,
    Error(String),
    Warning(String),
    Updated(DateTime<Local>),
}

#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub phase: CyclePhase,
    pub dashboard: Dashboard,
    pub status: Status,
    /// Topic the visible data was fetched with; the header shows this one,
    /// not a half-edited input value.
    pub display_topic: String,
    pub ui: UiState,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let display_topic = config.topic.clone();
        Self {
            config,
            phase: CyclePhase::Fetching,
            dashboard: Dashboard::Loading,
            status: Status::Loading,
            display_topic,
            ui: UiState::default(),
        }
    }

    pub fn headline_count(&self) -> usize {
        match &self.dashboard {
            Dashboard::Articles(table) => table.rows.len(),
            _ => 0,
        }
    }

    pub fn selected_article_url(&self) -> Option<String> {
        let Dashboard::Articles(table) = &self.dashboard else {
            return None;
        };
        let idx = self.ui.headline_list_state.selected()?;
        table.rows.get(idx).map(|row| row.article.url.clone())
    }
}
