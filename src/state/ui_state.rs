// src/state/ui_state.rs
use ratatui::widgets::ListState;
use tui_input::Input;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    EditingTopic,
}

#[derive(Debug)]
pub struct UiState {
    pub input_mode: InputMode,
    pub topic_input: Input,
    pub headline_list_state: ListState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            input_mode: InputMode::Normal,
            topic_input: Input::default(),
            headline_list_state: ListState::default(),
        }
    }
}
