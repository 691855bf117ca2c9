//! Form / detail panel rendering.
//!
//! Shows the create/edit form in form mode, otherwise the selected
//! task's details.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::theme;
use crate::app::{App, FormField, FormIntent, Mode};

/// Render the right-hand panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    if app.mode == Mode::Form {
        render_form(frame, area, app);
    } else {
        render_details(frame, area, app);
    }
}

/// Render the create/edit form with title and description inputs.
fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let panel_title = match app.form.intent {
        FormIntent::Create => "New Task",
        FormIntent::Edit(_) => "Edit Task",
    };
    let block = Block::default()
        .title(Span::styled(
            panel_title,
            theme::normal().fg(theme::FORM_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(inner);

    render_input(
        frame,
        chunks[0],
        "Title",
        &app.form.title,
        app.form.field == FormField::Title,
        app.form.cursor_position,
    );
    render_input(
        frame,
        chunks[1],
        "Description",
        &app.form.description,
        app.form.field == FormField::Description,
        app.form.cursor_position,
    );
}

/// Render one input box, with a block cursor when focused.
fn render_input(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    cursor_position: usize,
) {
    let mut display_text = value.to_string();
    if focused {
        if cursor_position >= display_text.len() {
            display_text.push('█');
        } else {
            display_text.insert(cursor_position, '█');
        }
    }

    let border_style = if focused {
        theme::highlighted()
    } else {
        theme::normal()
    };
    let paragraph = Paragraph::new(display_text).style(theme::normal()).block(
        Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);
}

/// Render the selected task's details.
fn render_details(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(Span::styled(
            "Details",
            theme::normal().fg(theme::FORM_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::normal());

    let lines = app.selected_task().map_or_else(
        || vec![Line::from(Span::styled("nothing selected", theme::dimmed()))],
        |task| {
            let status = if task.completed {
                Span::styled("completed", theme::normal().fg(theme::SUCCESS))
            } else {
                Span::styled("pending", theme::normal().fg(theme::WARNING))
            };
            vec![
                Line::from(Span::styled(task.title.as_str(), theme::bold())),
                Line::from(""),
                Line::from(Span::styled(task.description.as_str(), theme::normal())),
                Line::from(""),
                Line::from(vec![Span::styled("status: ", theme::dimmed()), status]),
                Line::from(vec![
                    Span::styled("created: ", theme::dimmed()),
                    Span::styled(
                        task.created_at
                            .with_timezone(&chrono::Local)
                            .format("%Y-%m-%d %H:%M:%S")
                            .to_string(),
                        theme::normal(),
                    ),
                ]),
                Line::from(vec![
                    Span::styled("updated: ", theme::dimmed()),
                    Span::styled(
                        task.updated_at
                            .with_timezone(&chrono::Local)
                            .format("%Y-%m-%d %H:%M:%S")
                            .to_string(),
                        theme::normal(),
                    ),
                ]),
            ]
        },
    );

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(paragraph, area);
}
