// src/ui/widgets/technical.rs

use crate::app::{App, AppState};
use crate::core::models::SiteStatus;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// Renders the infrastructure panel: IP, location, provider, protocol and
/// the online/offline status line.
///
/// Absent fields arrive as `None` from the resolver; the display fallbacks
/// ("not found", "unknown") live here and nowhere else.
pub fn render_technical(frame: &mut Frame, app: &App, area: Rect) {
    let container = Block::default()
        .borders(Borders::ALL)
        .title("Infrastructure & Domain");

    if !matches!(app.state, AppState::Finished) {
        frame.render_widget(Paragraph::new("").block(container), area);
        return;
    }

    let Some(result) = &app.result else {
        frame.render_widget(Paragraph::new("").block(container), area);
        return;
    };
    let technical = &result.technical;

    let ip = technical.ip.as_deref().unwrap_or("not found");
    let country = technical.country.as_deref().unwrap_or("unknown");
    let location = technical.location.as_deref().unwrap_or("unknown");
    let provider = technical.provider.as_deref().unwrap_or("unknown");

    let field = |label: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{label:<12}"), Style::default().fg(Color::DarkGray)),
            Span::raw(value.to_string()),
        ])
    };

    let (status_text, status_style) = match technical.status {
        SiteStatus::Online => (
            "● ONLINE / DNS responding",
            Style::default().fg(Color::Green),
        ),
        SiteStatus::Offline => ("● OFFLINE / connectivity issues", Style::default().fg(Color::Red)),
        SiteStatus::Checking => ("● CHECKING...", Style::default().fg(Color::Yellow)),
    };

    let lines = vec![
        Line::from(""),
        field("IP Address", ip),
        Line::from(""),
        field("Location", &format!("{country} ({location})")),
        Line::from(""),
        field("Provider", provider),
        Line::from(""),
        field("Protocol", &technical.protocol.to_string()),
        Line::from(""),
        Line::from(Span::styled(status_text, status_style.add_modifier(Modifier::BOLD))),
    ];

    frame.render_widget(Paragraph::new(lines).block(container), area);
}
