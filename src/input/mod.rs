// src/input/mod.rs
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::widgets::ListState;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::app::App;
use crate::refresh::CyclePhase;
use crate::state::ui_state::InputMode;

pub trait Command {
    fn execute(&self, app: &mut App) -> Result<()>;
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&self, key: KeyEvent, app: &mut App) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // the topic editor swallows everything except commit/cancel
        if app.state.ui.input_mode == InputMode::EditingTopic {
            return match key.code {
                KeyCode::Esc => CancelTopicEditCommand.execute(app),
                KeyCode::Enter => CommitTopicCommand.execute(app),
                _ => {
                    app.state.ui.topic_input.handle_event(&Event::Key(key));
                    Ok(())
                }
            };
        }

        if let Some(cmd) = self.command_for(key.code, app) {
            return cmd.execute(app);
        }
        Ok(())
    }

    fn command_for(&self, key: KeyCode, app: &App) -> Option<Box<dyn Command>> {
        match key {
            KeyCode::Char('q') => Some(Box::new(QuitCommand)),
            KeyCode::Char('t') | KeyCode::Char('/') => Some(Box::new(StartTopicEditCommand)),
            KeyCode::Char('a') => Some(Box::new(ToggleAutoRefreshCommand)),
            KeyCode::Char('r') => Some(Box::new(RefreshNowCommand)),
            KeyCode::Char('j') | KeyCode::Down => Some(Box::new(NextHeadlineCommand)),
            KeyCode::Char('k') | KeyCode::Up => Some(Box::new(PrevHeadlineCommand)),
            KeyCode::Enter => {
                if app.state.ui.headline_list_state.selected().is_some() {
                    Some(Box::new(OpenArticleCommand))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

pub struct QuitCommand;
impl Command for QuitCommand {
    fn execute(&self, app: &mut App) -> Result<()> {
        app.should_quit = true;
        Ok(())
    }
}

pub struct StartTopicEditCommand;
impl Command for StartTopicEditCommand {
    fn execute(&self, app: &mut App) -> Result<()> {
        app.state.ui.topic_input = Input::new(app.state.config.topic.clone());
        app.state.ui.input_mode = InputMode::EditingTopic;
        Ok(())
    }
}

pub struct CancelTopicEditCommand;
impl Command for CancelTopicEditCommand {
    fn execute(&self, app: &mut App) -> Result<()> {
        app.state.ui.input_mode = InputMode::Normal;
        Ok(())
    }
}

/// Store the edited topic. A pending wait is left alone: the new topic is
/// picked up at the next wake-up (or with a manual refresh).
pub struct CommitTopicCommand;
impl Command for CommitTopicCommand {
    fn execute(&self, app: &mut App) -> Result<()> {
        let value = app.state.ui.topic_input.value().trim().to_string();
        app.state.ui.input_mode = InputMode::Normal;
        if !value.is_empty() {
            app.state.config.topic = value;
        }
        Ok(())
    }
}

pub struct ToggleAutoRefreshCommand;
impl Command for ToggleAutoRefreshCommand {
    fn execute(&self, app: &mut App) -> Result<()> {
        app.state.config.auto_refresh = !app.state.config.auto_refresh;
        if app.state.config.auto_refresh {
            // a cycle in flight will arm the timer itself when it lands
            if app.state.phase != CyclePhase::Fetching {
                app.arm_refresh();
            }
        } else {
            app.cancel_refresh();
        }
        Ok(())
    }
}

pub struct RefreshNowCommand;
impl Command for RefreshNowCommand {
    fn execute(&self, app: &mut App) -> Result<()> {
        app.start_cycle();
        Ok(())
    }
}

pub struct NextHeadlineCommand;
impl Command for NextHeadlineCommand {
    fn execute(&self, app: &mut App) -> Result<()> {
        let count = app.state.headline_count();
        if count > 0 {
            navigate_list_down(&mut app.state.ui.headline_list_state, count);
        }
        Ok(())
    }
}

pub struct PrevHeadlineCommand;
impl Command for PrevHeadlineCommand {
    fn execute(&self, app: &mut App) -> Result<()> {
        let count = app.state.headline_count();
        if count > 0 {
            navigate_list_up(&mut app.state.ui.headline_list_state, count);
        }
        Ok(())
    }
}

/// Launch the selected headline in the default browser, off the event loop.
pub struct OpenArticleCommand;
impl Command for OpenArticleCommand {
    fn execute(&self, app: &mut App) -> Result<()> {
        if let Some(url) = app.state.selected_article_url() {
            tokio::spawn(async move {
                let _ = tokio::task::spawn_blocking(move || {
                    let _ = open::that(url);
                })
                .await;
            });
        }
        Ok(())
    }
}

fn navigate_list_up(list_state: &mut ListState, list_length: usize) {
    let new_index = match list_state.selected() {
        Some(i) => {
            if i == 0 {
                list_length - 1
            } else {
                i - 1
            }
        }
        None => 0,
    };
    list_state.select(Some(new_index));
}

fn navigate_list_down(list_state: &mut ListState, list_length: usize) {
    let new_index = match list_state.selected() {
        Some(i) => {
            if i >= list_length - 1 {
                0
            } else {
                i + 1
            }
        }
        None => 0,
    };
    list_state.select(Some(new_index));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NewsClient;
    use crate::config::AppConfig;
    use crate::model::{ArticleTable, RawArticle, RawSource};
    use crate::state::Dashboard;
    use crossterm::event::KeyModifiers;

    fn test_app() -> App {
        let client = NewsClient::new("test-key".to_string())
            .unwrap()
            .with_base_url("http://127.0.0.1:1");
        App::new(AppConfig::default(), client)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn with_articles(app: &mut App, titles: &[&str]) {
        let articles: Vec<RawArticle> = titles
            .iter()
            .map(|t| RawArticle {
                title: Some(t.to_string()),
                url: Some(format!("https://example.com/{t}")),
                source: Some(RawSource {
                    name: Some("Reuters".to_string()),
                }),
                published_at: None,
            })
            .collect();
        app.state.dashboard = Dashboard::Articles(ArticleTable::from_articles(&articles));
        app.state.ui.headline_list_state.select(Some(0));
    }

    #[test]
    fn q_quits() {
        let mut app = test_app();
        InputHandler::new().handle_key(key(KeyCode::Char('q')), &mut app).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn headline_navigation_wraps() {
        let mut app = test_app();
        with_articles(&mut app, &["a", "b", "c"]);
        let handler = InputHandler::new();

        handler.handle_key(key(KeyCode::Char('j')), &mut app).unwrap();
        assert_eq!(app.state.ui.headline_list_state.selected(), Some(1));

        handler.handle_key(key(KeyCode::Char('j')), &mut app).unwrap();
        handler.handle_key(key(KeyCode::Char('j')), &mut app).unwrap();
        assert_eq!(app.state.ui.headline_list_state.selected(), Some(0));

        handler.handle_key(key(KeyCode::Char('k')), &mut app).unwrap();
        assert_eq!(app.state.ui.headline_list_state.selected(), Some(2));
    }

    #[test]
    fn navigation_without_articles_is_a_no_op() {
        let mut app = test_app();
        InputHandler::new().handle_key(key(KeyCode::Char('j')), &mut app).unwrap();
        assert_eq!(app.state.ui.headline_list_state.selected(), None);
    }

    #[test]
    fn topic_edit_commits_on_enter() {
        let mut app = test_app();
        let handler = InputHandler::new();

        handler.handle_key(key(KeyCode::Char('t')), &mut app).unwrap();
        assert_eq!(app.state.ui.input_mode, InputMode::EditingTopic);
        assert_eq!(app.state.ui.topic_input.value(), "technology");

        for _ in 0.."technology".len() {
            handler.handle_key(key(KeyCode::Backspace), &mut app).unwrap();
        }
        for c in "spaceX".chars() {
            handler.handle_key(key(KeyCode::Char(c)), &mut app).unwrap();
        }
        handler.handle_key(key(KeyCode::Enter), &mut app).unwrap();

        assert_eq!(app.state.ui.input_mode, InputMode::Normal);
        assert_eq!(app.state.config.topic, "spaceX");
    }

    #[test]
    fn topic_edit_cancels_on_esc() {
        let mut app = test_app();
        let handler = InputHandler::new();

        handler.handle_key(key(KeyCode::Char('t')), &mut app).unwrap();
        handler.handle_key(key(KeyCode::Char('x')), &mut app).unwrap();
        handler.handle_key(key(KeyCode::Esc), &mut app).unwrap();

        assert_eq!(app.state.ui.input_mode, InputMode::Normal);
        assert_eq!(app.state.config.topic, "technology");
    }

    #[test]
    fn blank_topic_is_not_committed() {
        let mut app = test_app();
        let handler = InputHandler::new();

        handler.handle_key(key(KeyCode::Char('t')), &mut app).unwrap();
        for _ in 0.."technology".len() {
            handler.handle_key(key(KeyCode::Backspace), &mut app).unwrap();
        }
        handler.handle_key(key(KeyCode::Enter), &mut app).unwrap();

        assert_eq!(app.state.config.topic, "technology");
    }

    #[tokio::test]
    async fn toggling_auto_refresh_arms_and_cancels_the_wait() {
        let mut app = test_app();
        app.state.config.auto_refresh = false;
        app.state.phase = CyclePhase::Terminated;
        let handler = InputHandler::new();

        handler.handle_key(key(KeyCode::Char('a')), &mut app).unwrap();
        assert!(app.state.config.auto_refresh);
        assert_eq!(app.state.phase, CyclePhase::Waiting);
        assert!(app.scheduler.is_armed());

        handler.handle_key(key(KeyCode::Char('a')), &mut app).unwrap();
        assert!(!app.state.config.auto_refresh);
        assert_eq!(app.state.phase, CyclePhase::Terminated);
        assert!(!app.scheduler.is_armed());
    }
}
