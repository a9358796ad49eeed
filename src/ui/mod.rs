// src/ui/mod.rs

use crate::app::App;
use ratatui::prelude::*;

mod layout;
mod widgets;

pub fn render(app: &mut App, frame: &mut Frame) {
    let layout = layout::create_layout(frame.area());

    widgets::input::render_input(frame, app, layout.input);
    widgets::report::render_report(frame, app, layout.report);
    widgets::technical::render_technical(frame, app, layout.technical);
    widgets::footer::render_footer(frame, app, layout.footer);
}
