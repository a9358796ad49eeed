// src/app.rs

use crate::core::error::AnalysisError;
use crate::core::models::AnalysisResult;

pub enum AppState {
    Idle,
    Analyzing,
    Finished,
}

pub struct App {
    pub should_quit: bool,
    pub state: AppState,
    pub input: String,
    /// Set on success. At most one of `result`/`error` is ever set.
    pub result: Option<AnalysisResult>,
    /// User-facing message, set on failure.
    pub error: Option<String>,
    pub scroll_offset: usize,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            state: AppState::Idle,
            input: String::new(),
            result: None,
            error: None,
            scroll_offset: 0,
        }
    }

    /// Records the outcome of an analysis, keeping the result/error slots
    /// mutually exclusive.
    pub fn set_outcome(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                self.result = None;
                self.error = Some(e.to_string());
            }
        }
        self.state = AppState::Finished;
        self.scroll_offset = 0;
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.input = String::new();
        self.result = None;
        self.error = None;
        self.scroll_offset = 0;
    }
}
