//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success indicator color.
pub const SUCCESS: Color = Color::Green;

/// Warning indicator color.
pub const WARNING: Color = Color::Yellow;

/// Error indicator color.
pub const ERROR: Color = Color::Red;

/// Panel title color for the task list.
pub const LIST_TITLE: Color = Color::Green;

/// Panel title color for the form/detail panel.
pub const FORM_TITLE: Color = Color::Cyan;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (timestamps, completed tasks, metadata).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Error message style.
#[must_use]
pub fn error() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
}

/// Status bar background style.
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().bg(Color::Rgb(30, 30, 46)).fg(FG_PRIMARY)
}
