//! Terminal UI rendering.

pub mod form_panel;
pub mod status_bar;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Header on top, status bar at the bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, main_chunks[0], app);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Task list
            Constraint::Percentage(40), // Form / details
        ])
        .split(main_chunks[1]);

    task_list::render(frame, content_chunks[0], app);
    form_panel::render(frame, content_chunks[1], app);

    status_bar::render(frame, main_chunks[2], app);
}

/// Render the header line with the server greeting.
fn render_header(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let line = if let Some(greeting) = &app.greeting {
        Line::from(vec![
            Span::styled("● ", theme::normal().fg(theme::SUCCESS)),
            Span::styled(greeting.as_str(), theme::normal()),
        ])
    } else if let Some(reason) = &app.greeting_error {
        Line::from(vec![
            Span::styled("● ", theme::normal().fg(theme::ERROR)),
            Span::styled(format!("server unreachable: {reason}"), theme::dimmed()),
        ])
    } else {
        Line::from(Span::styled("● connecting...", theme::dimmed()))
    };
    frame.render_widget(Paragraph::new(line), area);
}
