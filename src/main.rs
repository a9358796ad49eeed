// src/main.rs

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

mod app;
mod core;
mod logging;
mod ui;

use app::{App, AppState};
use crate::core::analyzer::Analyzer;
use crate::core::error::AnalysisError;
use crate::core::models::AnalysisResult;

type AnalysisOutcome = Result<AnalysisResult, AnalysisError>;

#[tokio::main]
async fn main() -> Result<()> {
    logging::initialize_logging()?;

    // The AI credential is read once at startup and handed to the analyzer;
    // nothing else reads the environment afterwards.
    let api_key = std::env::var("GEMINI_API_KEY")
        .or_else(|_| std::env::var("SITEINSIGHT_API_KEY"))
        .ok();
    let analyzer = Arc::new(Analyzer::new(api_key));

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut app = App::new();
    let (tx, mut rx) = mpsc::channel::<AnalysisOutcome>(1);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(&mut app, &analyzer, &tx)?;
        }

        if let Ok(outcome) = rx.try_recv() {
            app.set_outcome(outcome);
        }
    }

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}

/// Single event handler, dispatching on the app state.
fn handle_events(
    app: &mut App,
    analyzer: &Arc<Analyzer>,
    tx: &mpsc::Sender<AnalysisOutcome>,
) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            match app.state {
                AppState::Idle => handle_idle_input(app, key.code, analyzer, tx),
                AppState::Finished => handle_finished_input(app, key.code),
                AppState::Analyzing => {
                    if key.code == KeyCode::Char('q') {
                        app.quit();
                    }
                }
            }
        }
    }
    Ok(())
}

/// Handles input while the app is waiting for a URL.
fn handle_idle_input(
    app: &mut App,
    key_code: KeyCode,
    analyzer: &Arc<Analyzer>,
    tx: &mpsc::Sender<AnalysisOutcome>,
) {
    match key_code {
        KeyCode::Esc => app.quit(),
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Enter => {
            // Empty input is rejected here; the core never sees it.
            if app.input.trim().is_empty() {
                return;
            }
            app.state = AppState::Analyzing;
            let tx_clone = tx.clone();
            let analyzer_clone = Arc::clone(analyzer);
            let raw_input = app.input.clone();

            tokio::spawn(async move {
                // A panic in the analysis task must still surface a readable
                // message, not leave the UI stuck in the Analyzing state.
                let task =
                    tokio::spawn(async move { analyzer_clone.analyze(&raw_input).await });
                let outcome = match task.await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        tracing::error!(error = %e, "Analysis task failed unexpectedly.");
                        Err(AnalysisError::Unexpected)
                    }
                };
                let _ = tx_clone.send(outcome).await;
            });
        }
        _ => {}
    }
}

/// Handles input while a report (or error) is on screen.
fn handle_finished_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('n') => app.reset(), // 'N' for a new analysis
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        _ => {}
    }
}
