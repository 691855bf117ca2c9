//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Mode};

/// Render the status bar at the bottom of the screen.
///
/// Errors take priority over the help text; the delete-all
/// confirmation prompt and in-flight indicator take priority over
/// both.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let line = if app.mode == Mode::ConfirmDeleteAll {
        Line::from(Span::styled(
            format!("delete all {} tasks? y/n", app.tasks.len()),
            theme::normal().fg(theme::WARNING),
        ))
    } else if app.deleting_all {
        Line::from(Span::styled("deleting...", theme::dimmed()))
    } else if let Some(error) = &app.error {
        Line::from(Span::styled(error.as_str(), theme::error()))
    } else {
        let help_text = match app.mode {
            Mode::Browse => {
                "↑↓/jk: navigate | space: toggle | n: new | e: edit | d: delete | D: delete all | r: refresh | q: quit"
            }
            Mode::Form => "Enter: save | Tab: switch field | Esc: cancel | ←→: move cursor",
            Mode::ConfirmDeleteAll => "y: confirm | n: cancel",
        };
        Line::from(Span::styled(help_text, theme::dimmed()))
    };

    let paragraph = Paragraph::new(line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
