// src/ui/widgets/report.rs

use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Renders the content report panel: the AI summary card on success, the
/// unified error message on failure, and placeholder text otherwise.
pub fn render_report(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title("Content Report (scroll with ↑ ↓)");

    if !matches!(app.state, AppState::Finished) {
        let content = match app.state {
            AppState::Idle => Paragraph::new(vec![
                Line::from(""),
                Line::from("Enter a URL to start the analysis."),
                Line::from(""),
                Line::from(Span::styled(
                    "e.g. google.com, wikipedia.org, example.com",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center),
            AppState::Analyzing => {
                Paragraph::new("Analyzing... Please wait.").alignment(Alignment::Center)
            }
            _ => Paragraph::new(""),
        };
        frame.render_widget(content.block(main_block), area);
        return;
    }

    if let Some(error) = &app.error {
        render_error(frame, error, main_block, area);
        return;
    }

    let Some(result) = &app.result else {
        frame.render_widget(Paragraph::new("").block(main_block), area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", result.category.to_uppercase()),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("analyzed at {}", result.timestamp.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            result.url.as_str(),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from("CONTENT SUMMARY".bold()),
        Line::from(""),
    ];
    lines.extend(result.summary.lines().map(|l| Line::from(l.to_string())));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((app.scroll_offset as u16, 0))
        .block(main_block);
    frame.render_widget(paragraph, area);
}

fn render_error(frame: &mut Frame, error: &str, block: Block, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from("✗ ANALYSIS FAILED".bold().fg(Color::Red)),
        Line::from(""),
        Line::from(error.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Hint: check that the URL is typed correctly and that the site is publicly accessible.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}
