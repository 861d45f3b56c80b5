use crate::session::{SessionError, SessionState, SolveController, SolveRequest};
use crate::state::UiState;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossword_core::SolverAdapter;
use log::debug;
use std::sync::Arc;
use std::time::Duration;

/// Spinner shown next to the status while solving
pub const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Editable form fields, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Structure,
    Words,
    Output,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Structure, Field::Words, Field::Output];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Structure => "Structure file:",
            Field::Words => "Words file:",
            Field::Output => "Save image (optional):",
        }
    }

    fn next(self) -> Self {
        match self {
            Field::Structure => Field::Words,
            Field::Words => Field::Output,
            Field::Output => Field::Structure,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Structure => Field::Output,
            Field::Words => Field::Structure,
            Field::Output => Field::Words,
        }
    }
}

/// The main application state
pub struct App {
    /// Structure file path as typed
    pub structure: String,
    /// Words file path as typed
    pub words: String,
    /// Image output path as typed, blank for none
    pub output: String,
    /// Field receiving typed characters
    pub focus: Field,
    /// State shared with solve workers through the bridge
    pub ui: UiState,
    /// Color theme
    pub theme: Theme,
    /// Transient hint line
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Spinner frame while solving
    pub spinner: usize,
    controller: SolveController,
}

impl App {
    /// Create an app with the form prefilled from `defaults`
    pub fn new(adapter: Arc<dyn SolverAdapter>, defaults: &SolveRequest) -> Self {
        Self {
            structure: defaults.structure_path.display().to_string(),
            words: defaults.words_path.display().to_string(),
            output: defaults
                .output_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            focus: Field::Structure,
            ui: UiState::new(),
            theme: Theme::dark(),
            message: None,
            message_timer: 0,
            spinner: 0,
            controller: SolveController::new(adapter),
        }
    }

    /// Get the tick rate; faster while the spinner runs
    pub fn get_tick_rate(&self) -> Duration {
        if self.ui.session.is_solving() {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(100)
        }
    }

    /// Apply worker updates and advance timers (called every tick)
    pub fn tick(&mut self) {
        self.controller.pump(&mut self.ui);

        if self.ui.session.is_solving() {
            self.spinner = (self.spinner + 1) % SPINNER.len();
        }

        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Structure => &self.structure,
            Field::Words => &self.words,
            Field::Output => &self.output,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Structure => &mut self.structure,
            Field::Words => &mut self.words,
            Field::Output => &mut self.output,
        }
    }

    /// Whether the Solve trigger currently accepts input
    pub fn can_solve(&self) -> bool {
        self.ui.trigger_enabled && self.ui.session.state() != SessionState::Solving
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if self.ui.current_notification().is_some() {
            return self.handle_dialog_key(key);
        }

        match key.code {
            KeyCode::Esc => return AppAction::Quit,

            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),

            KeyCode::Enter | KeyCode::F(5) => self.solve(),

            KeyCode::F(2) => {
                self.theme = self.theme.next();
                let msg = format!("{} theme", self.theme.name);
                self.show_message(&msg);
            }

            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => self.reset(),

            KeyCode::Backspace => {
                self.field_mut(self.focus).pop();
            }

            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.field_mut(self.focus).push(c);
            }

            _ => {}
        }

        AppAction::Continue
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) -> AppAction {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.ui.dismiss_notification();
        }
        AppAction::Continue
    }

    /// Trigger a solve with the current form contents
    pub fn solve(&mut self) {
        if !self.can_solve() {
            self.show_message("Already solving");
            return;
        }

        let request = SolveRequest::from_form(&self.structure, &self.words, &self.output);
        match self.controller.start(&mut self.ui, request) {
            Ok(generation) => debug!("solve #{} dispatched", generation),
            Err(SessionError::Busy) => self.show_message("Already solving"),
        }
    }

    fn reset(&mut self) {
        match self.controller.reset(&mut self.ui) {
            Ok(()) => self.show_message("Cleared"),
            Err(SessionError::Busy) => self.show_message("Cannot clear while solving"),
        }
    }
}
