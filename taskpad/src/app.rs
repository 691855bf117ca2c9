//! Application state and event handling.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskpad_api::task::{Task, TaskId, validate_title};

use crate::net::NetCommand;
use crate::tasks::StoreUpdate;

/// Which mode the UI is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Browsing the task list (default).
    Browse,
    /// Editing the create/edit form.
    Form,
    /// Waiting for delete-all confirmation.
    ConfirmDeleteAll,
}

/// Which form field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// The title input.
    Title,
    /// The description input.
    Description,
}

/// Whether the form creates a new task or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormIntent {
    /// Submitting creates a new task.
    Create,
    /// Submitting updates the given task.
    Edit(TaskId),
}

/// State of the create/edit form.
#[derive(Debug)]
pub struct FormState {
    /// What submitting the form does.
    pub intent: FormIntent,
    /// Which field has focus.
    pub field: FormField,
    /// Title input buffer.
    pub title: String,
    /// Description input buffer.
    pub description: String,
    /// Cursor position in the focused field (byte index).
    pub cursor_position: usize,
}

impl FormState {
    fn create() -> Self {
        Self {
            intent: FormIntent::Create,
            field: FormField::Title,
            title: String::new(),
            description: String::new(),
            cursor_position: 0,
        }
    }

    fn edit(task: &Task) -> Self {
        Self {
            intent: FormIntent::Edit(task.id),
            field: FormField::Title,
            cursor_position: task.title.len(),
            title: task.title.clone(),
            description: task.description.clone(),
        }
    }

    fn focused_buffer(&mut self) -> &mut String {
        match self.field {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
        }
    }
}

/// Main application state.
pub struct App {
    /// Current local task list, newest-first.
    pub tasks: Vec<Task>,
    /// Latest operation error, if any.
    pub error: Option<String>,
    /// Whether a list refresh is in flight.
    pub loading: bool,
    /// Greeting fetched at startup.
    pub greeting: Option<String>,
    /// Why the greeting fetch failed, if it did.
    pub greeting_error: Option<String>,
    /// Current UI mode.
    pub mode: Mode,
    /// Create/edit form state.
    pub form: FormState,
    /// Selected task index.
    pub selected: usize,
    /// Whether a delete-all is in flight.
    pub deleting_all: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    error_since: Option<Instant>,
    error_display: Duration,
}

impl App {
    /// Create a new application.
    ///
    /// `error_display` is how long errors stay on screen before
    /// auto-clearing.
    #[must_use]
    pub fn new(error_display: Duration) -> Self {
        Self {
            tasks: Vec::new(),
            error: None,
            loading: false,
            greeting: None,
            greeting_error: None,
            mode: Mode::Browse,
            form: FormState::create(),
            selected: 0,
            deleting_all: false,
            should_quit: false,
            error_since: None,
            error_display,
        }
    }

    /// The currently selected task, if any.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    /// Apply a store update from the network task.
    pub fn apply_store_update(&mut self, update: StoreUpdate) {
        self.tasks = update.tasks;
        self.loading = update.loading;
        if update.error.is_some() && update.error != self.error {
            self.error_since = Some(Instant::now());
        }
        self.error = update.error;
        if self.selected >= self.tasks.len() {
            self.selected = self.tasks.len().saturating_sub(1);
        }
        // Any update after arming means the delete-all resolved.
        if self.deleting_all && (self.tasks.is_empty() || self.error.is_some()) {
            self.deleting_all = false;
        }
    }

    /// Record the startup greeting.
    pub fn set_greeting(&mut self, message: String) {
        self.greeting = Some(message);
        self.greeting_error = None;
    }

    /// Record a failed greeting fetch.
    pub fn set_greeting_error(&mut self, reason: String) {
        self.greeting_error = Some(reason);
    }

    /// Record an error raised locally (not via the store).
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.error_since = Some(Instant::now());
    }

    /// Advance time-based state; call once per frame.
    ///
    /// Auto-clears the error once it has been shown long enough.
    pub fn tick(&mut self) {
        if let Some(since) = self.error_since
            && since.elapsed() >= self.error_display
        {
            self.error = None;
            self.error_since = None;
        }
    }

    /// Handle a key event, possibly producing a network command.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<NetCommand> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }
        match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Form => self.handle_form_key(key),
            Mode::ConfirmDeleteAll => self.handle_confirm_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<NetCommand> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Char(' ') | KeyCode::Enter => self
                .selected_task()
                .map(|task| NetCommand::Toggle { id: task.id }),
            KeyCode::Char('n') => {
                self.form = FormState::create();
                self.mode = Mode::Form;
                None
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.selected_task() {
                    self.form = FormState::edit(task);
                    self.mode = Mode::Form;
                }
                None
            }
            KeyCode::Char('d') => self
                .selected_task()
                .map(|task| NetCommand::Delete { id: task.id }),
            KeyCode::Char('D') => {
                if !self.tasks.is_empty() && !self.deleting_all {
                    self.mode = Mode::ConfirmDeleteAll;
                }
                None
            }
            KeyCode::Char('r') => Some(NetCommand::Refresh),
            _ => None,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<NetCommand> {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Browse;
                None
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.switch_form_field();
                None
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => {
                self.enter_char(c);
                None
            }
            KeyCode::Backspace => {
                self.delete_char();
                None
            }
            KeyCode::Left => {
                self.move_cursor_left();
                None
            }
            KeyCode::Right => {
                self.move_cursor_right();
                None
            }
            KeyCode::Home => {
                self.form.cursor_position = 0;
                None
            }
            KeyCode::End => {
                self.form.cursor_position = self.form.focused_buffer().len();
                None
            }
            _ => None,
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Option<NetCommand> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.mode = Mode::Browse;
                self.deleting_all = true;
                Some(NetCommand::DeleteAll)
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.mode = Mode::Browse;
                None
            }
            _ => None,
        }
    }

    /// Submit the form if the title is valid; otherwise show the
    /// validation error inline and stay in form mode.
    fn submit_form(&mut self) -> Option<NetCommand> {
        let title = match validate_title(&self.form.title) {
            Ok(title) => title,
            Err(e) => {
                self.set_error(e.to_string());
                return None;
            }
        };
        let description = self.form.description.trim().to_string();
        let command = match self.form.intent {
            FormIntent::Create => NetCommand::Create { title, description },
            FormIntent::Edit(id) => NetCommand::Update {
                id,
                title,
                description,
            },
        };
        self.mode = Mode::Browse;
        self.form = FormState::create();
        Some(command)
    }

    fn switch_form_field(&mut self) {
        self.form.field = match self.form.field {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Title,
        };
        self.form.cursor_position = self.form.focused_buffer().len();
    }

    /// Insert a character at the cursor position.
    fn enter_char(&mut self, c: char) {
        let position = self.form.cursor_position;
        self.form.focused_buffer().insert(position, c);
        self.form.cursor_position += c.len_utf8();
    }

    /// Delete the character before the cursor.
    fn delete_char(&mut self) {
        let position = self.form.cursor_position;
        if position > 0 {
            let buffer = self.form.focused_buffer();
            let prev = previous_boundary(buffer, position);
            buffer.remove(prev);
            self.form.cursor_position = prev;
        }
    }

    /// Move cursor left one character.
    fn move_cursor_left(&mut self) {
        let position = self.form.cursor_position;
        if position > 0 {
            self.form.cursor_position = previous_boundary(self.form.focused_buffer(), position);
        }
    }

    /// Move cursor right one character.
    fn move_cursor_right(&mut self) {
        let position = self.form.cursor_position;
        let buffer = self.form.focused_buffer();
        if position < buffer.len() {
            let next = buffer[position..]
                .chars()
                .next()
                .map_or(buffer.len(), |c| position + c.len_utf8());
            self.form.cursor_position = next;
        }
    }

    /// Select the previous task.
    const fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Select the next task.
    fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }
}

/// Byte index of the character boundary before `position`.
fn previous_boundary(s: &str, position: usize) -> usize {
    s[..position]
        .char_indices()
        .next_back()
        .map_or(0, |(i, _)| i)
}
