// src/app.rs
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

use crate::api::{FetchError, NewsClient};
use crate::config::{AppConfig, REFRESH_INTERVAL};
use crate::input::InputHandler;
use crate::model::{ArticleTable, RawArticle};
use crate::refresh::{CyclePhase, Scheduler};
use crate::state::{AppState, Dashboard, Status};
use crate::ui;

pub const NO_ARTICLES_MSG: &str = "No articles found for this topic. Try another one.";
pub const API_ERROR_MSG: &str =
    "Could not fetch news. The API might be down or your key is invalid.";

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    FetchDone {
        topic: String,
        outcome: Result<Vec<RawArticle>, FetchError>,
    },
    RefreshDue,
    /// Once-a-second nudge so the countdown and clock repaint.
    Tick,
}

pub struct App {
    pub state: AppState,
    pub scheduler: Scheduler,
    pub should_quit: bool,
    client: Arc<NewsClient>,
    tx: UnboundedSender<AppEvent>,
    rx: UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(config: AppConfig, client: NewsClient) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(config),
            scheduler: Scheduler::new(),
            should_quit: false,
            client: Arc::new(client),
            tx,
            rx,
        }
    }

    /// Sender for the tasks that feed the event loop (keyboard reader,
    /// tick timer).
    pub fn event_sender(&self) -> UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.start_cycle();
        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;
            let Some(event) = self.rx.recv().await else {
                break;
            };
            self.handle_event(event)?;
            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Key(key) => InputHandler::new().handle_key(key, self),
            AppEvent::FetchDone { topic, outcome } => {
                self.on_fetch_done(topic, outcome);
                Ok(())
            }
            AppEvent::RefreshDue => {
                info!("refresh interval elapsed");
                self.start_cycle();
                Ok(())
            }
            AppEvent::Tick => Ok(()),
        }
    }

    /// Kick off one fetch -> transform -> render cycle with whatever topic
    /// is current. The fetch runs on its own task and reports back over the
    /// event channel, so the terminal stays responsive meanwhile.
    pub fn start_cycle(&mut self) {
        self.scheduler.cancel();
        self.state.phase = CyclePhase::Fetching;
        self.state.status = Status::Loading;

        let topic = self.state.config.topic.clone();
        info!(topic = %topic, "starting refresh cycle");

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client.fetch(&topic).await;
            let _ = tx.send(AppEvent::FetchDone { topic, outcome });
        });
    }

    fn on_fetch_done(&mut self, topic: String, outcome: Result<Vec<RawArticle>, FetchError>) {
        match outcome {
            Ok(articles) => {
                let table = ArticleTable::from_articles(&articles);
                if table.is_empty() {
                    self.state.dashboard = Dashboard::NoArticles;
                    self.state.status = Status::Warning(NO_ARTICLES_MSG.to_string());
                } else {
                    if table.malformed > 0 {
                        warn!(skipped = table.malformed, "dropped malformed articles");
                    }
                    self.state.dashboard = Dashboard::Articles(table);
                    self.state.status = Status::Updated(chrono::Local::now());
                    self.state.ui.headline_list_state.select(Some(0));
                }
            }
            Err(err @ FetchError::Api(_)) => {
                warn!(error = %err, "news API returned an unusable payload");
                self.state.dashboard = Dashboard::NoArticles;
                self.state.status = Status::Error(API_ERROR_MSG.to_string());
            }
            Err(err) => {
                warn!(error = %err, "fetch failed");
                self.state.dashboard = Dashboard::NoArticles;
                self.state.status = Status::Error(format!("An error occurred: {err}"));
            }
        }

        self.state.display_topic = topic;
        self.state.phase = CyclePhase::Displaying;
        self.finish_display();
    }

    /// Re-enter the Waiting state with a fresh timer (auto-refresh switched
    /// back on).
    pub fn arm_refresh(&mut self) {
        self.state.phase = CyclePhase::Waiting;
        self.scheduler.arm(self.tx.clone(), REFRESH_INTERVAL);
    }

    /// Cancel a pending wait; the loop is over until the user intervenes.
    pub fn cancel_refresh(&mut self) {
        self.scheduler.cancel();
        if self.state.phase == CyclePhase::Waiting {
            self.state.phase = CyclePhase::Terminated;
        }
    }

    /// Displaying -> Waiting (timer armed) or Terminated, depending on the
    /// auto-refresh toggle.
    fn finish_display(&mut self) {
        debug_assert_eq!(self.state.phase, CyclePhase::Displaying);
        self.state.phase = CyclePhase::after_display(self.state.config.auto_refresh);
        if self.state.phase == CyclePhase::Waiting {
            self.scheduler.arm(self.tx.clone(), REFRESH_INTERVAL);
        } else {
            info!("auto-refresh disabled; refresh loop finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn test_app(auto_refresh: bool, base_url: &str) -> App {
        let config = AppConfig {
            topic: "technology".to_string(),
            auto_refresh,
        };
        let client = NewsClient::new("test-key".to_string())
            .unwrap()
            .with_base_url(base_url);
        App::new(config, client)
    }

    fn decode_error() -> FetchError {
        FetchError::Json(serde_json::from_str::<serde_json::Value>("not json").unwrap_err())
    }

    const ONE_ARTICLE: &str = r#"{
        "articles": [{
            "title": "Hello",
            "url": "https://example.com/hello",
            "source": {"name": "BBC News UK"},
            "publishedAt": "2025-11-03T14:07:31Z"
        }]
    }"#;

    #[tokio::test]
    async fn failed_fetch_surfaces_one_error_and_keeps_the_loop_alive() {
        let mut app = test_app(true, "http://127.0.0.1:1");

        app.handle_event(AppEvent::FetchDone {
            topic: "technology".to_string(),
            outcome: Err(decode_error()),
        })
        .unwrap();

        match &app.state.status {
            Status::Error(msg) => assert!(msg.starts_with("An error occurred:")),
            other => panic!("expected an error status, got {other:?}"),
        }
        assert_eq!(app.state.dashboard, Dashboard::NoArticles);
        // the loop survives: the next cycle is already scheduled
        assert_eq!(app.state.phase, CyclePhase::Waiting);
        assert!(app.scheduler.is_armed());

        // and the wake-up still attempts a fetch
        app.handle_event(AppEvent::RefreshDue).unwrap();
        assert_eq!(app.state.phase, CyclePhase::Fetching);
    }

    #[tokio::test]
    async fn shape_failure_shows_the_invalid_key_message() {
        let mut app = test_app(true, "http://127.0.0.1:1");

        app.handle_event(AppEvent::FetchDone {
            topic: "technology".to_string(),
            outcome: Err(FetchError::Api(Some("invalid key".to_string()))),
        })
        .unwrap();

        assert_eq!(app.state.status, Status::Error(API_ERROR_MSG.to_string()));
        assert_eq!(app.state.dashboard, Dashboard::NoArticles);
    }

    #[tokio::test]
    async fn empty_result_reaches_the_no_articles_state() {
        let mut app = test_app(true, "http://127.0.0.1:1");

        app.handle_event(AppEvent::FetchDone {
            topic: "technology".to_string(),
            outcome: Ok(Vec::new()),
        })
        .unwrap();

        assert_eq!(app.state.dashboard, Dashboard::NoArticles);
        assert_eq!(
            app.state.status,
            Status::Warning(NO_ARTICLES_MSG.to_string())
        );
    }

    #[tokio::test]
    async fn successful_cycle_updates_the_dashboard_and_waits() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/v4/search");
            then.status(200)
                .header("content-type", "application/json")
                .body(ONE_ARTICLE);
        });

        let mut app = test_app(true, &server.base_url());
        app.start_cycle();
        assert_eq!(app.state.phase, CyclePhase::Fetching);

        let event = app.rx.recv().await.unwrap();
        app.handle_event(event).unwrap();

        mock.assert();
        match &app.state.dashboard {
            Dashboard::Articles(table) => {
                assert_eq!(table.rows.len(), 1);
                assert_eq!(table.rows[0].country, "UK");
            }
            other => panic!("expected articles, got {other:?}"),
        }
        assert_eq!(app.state.phase, CyclePhase::Waiting);
        assert!(app.scheduler.is_armed());
    }

    #[tokio::test]
    async fn auto_refresh_off_runs_exactly_one_cycle() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/v4/search");
            then.status(200)
                .header("content-type", "application/json")
                .body(ONE_ARTICLE);
        });

        let mut app = test_app(false, &server.base_url());
        app.start_cycle();

        let event = app.rx.recv().await.unwrap();
        app.handle_event(event).unwrap();

        assert_eq!(app.state.phase, CyclePhase::Terminated);
        assert!(!app.scheduler.is_armed());
        assert_eq!(mock.hits(), 1);

        // nothing else is queued, so no further fetch can ever start
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(app.rx.try_recv().is_err());
        assert_eq!(mock.hits(), 1);
    }

    #[tokio::test]
    async fn new_table_selects_the_first_headline() {
        let mut app = test_app(true, "http://127.0.0.1:1");
        let articles: Vec<RawArticle> =
            serde_json::from_value(serde_json::from_str::<serde_json::Value>(ONE_ARTICLE)
                .unwrap()["articles"]
                .clone())
            .unwrap();

        app.handle_event(AppEvent::FetchDone {
            topic: "technology".to_string(),
            outcome: Ok(articles),
        })
        .unwrap();

        assert_eq!(app.state.ui.headline_list_state.selected(), Some(0));
        assert_eq!(app.state.display_topic, "technology");
    }
}
