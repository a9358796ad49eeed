// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Defines the areas of the application's user interface.
///
/// Each `Rect` is a widget area on the terminal screen, computed once per
/// frame so widgets never recalculate their own dimensions.
pub struct AppLayout {
    pub input: Rect,
    pub report: Rect,
    pub technical: Rect,
    pub footer: Rect,
}

/// Creates the complete application layout.
///
/// The frame is split into three vertical chunks: the URL input at the top,
/// the main content area in the middle, and a one-line footer at the bottom.
/// The content area is split horizontally between the AI content report and
/// the technical infrastructure panel.
pub fn create_layout(frame_size: Rect) -> AppLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame_size);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    AppLayout {
        input: main_chunks[0],
        report: content_chunks[0],
        technical: content_chunks[1],
        footer: main_chunks[2],
    }
}
