//! Task list panel rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::theme;
use crate::app::{App, Mode};

/// Render the task list panel, newest task on top.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let checkbox = if task.completed { "[✓]" } else { "[ ]" };
            let style = if app.mode == Mode::Browse && index == app.selected {
                theme::selected()
            } else if task.completed {
                theme::dimmed()
            } else {
                theme::normal()
            };

            let mut spans = vec![
                Span::styled(checkbox, style),
                Span::raw(" "),
                Span::styled(task.title.as_str(), style),
            ];
            if !task.description.is_empty() {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    format!("({})", task.description),
                    theme::dimmed(),
                ));
            }
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                task.created_at
                    .with_timezone(&chrono::Local)
                    .format("%H:%M")
                    .to_string(),
                theme::dimmed(),
            ));

            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = if app.loading {
        format!("Tasks ({}) [refreshing...]", app.tasks.len())
    } else {
        format!("Tasks ({})", app.tasks.len())
    };

    let border_style = if app.mode == Mode::Browse {
        theme::highlighted()
    } else {
        theme::normal()
    };

    let block = Block::default()
        .title(Span::styled(title, theme::normal().fg(theme::LIST_TITLE)))
        .borders(Borders::ALL)
        .border_style(border_style);

    let list = if items.is_empty() {
        List::new([ListItem::new(Line::from(Span::styled(
            "no tasks yet, press 'n' to create one",
            theme::dimmed(),
        )))])
    } else {
        List::new(items)
    };

    frame.render_widget(list.block(block), area);
}
