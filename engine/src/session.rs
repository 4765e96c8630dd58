//! FILENAME: engine/src/session.rs
//! PURPOSE: The calculator session: expression buffer, history line, and
//! the input state machine that accumulates keystrokes.
//! CONTEXT: The session is the only mutable state in the engine. A host
//! shell owns one instance, feeds it InputEvents, and renders whatever
//! display_text/history_text return. Illegal events are no-ops, never
//! faults.

use crate::error::EvalError;
use crate::evaluator::{self, EvalOptions};
use parser::{MathConstant, MathFunction};
use serde::{Deserialize, Serialize};

/// Maximum number of characters display_text returns.
pub const MAX_DISPLAY_WIDTH: usize = 14;

/// Literal buffer content after a failed evaluation.
pub const ERROR_MARKER: &str = "Error";

/// Which keypad the presentation layer should offer. The mode only gates
/// what the UI emits; the session accepts every event in either mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Standard,
    Scientific,
}

/// What the buffer currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryState {
    /// Normal accumulation of an expression under construction.
    Entering,
    /// The buffer holds the formatted result of the last evaluation.
    ShowingResult,
    /// The buffer holds the error marker.
    ShowingError,
}

/// Discrete input events, one per keystroke or button press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Digit(char),
    Decimal,
    /// One of + - * / ^ %.
    Operator(char),
    Function(MathFunction),
    Constant(MathConstant),
    LeftParen,
    RightParen,
    Clear,
    Backspace,
    Evaluate,
    ToggleMode,
}

/// The calculator session. Owned by the host, mutated only through apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    mode: Mode,
    buffer: String,
    history: String,
    state: EntryState,
    options: EvalOptions,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_options(EvalOptions::default())
    }

    pub fn with_options(options: EvalOptions) -> Self {
        Session {
            mode: Mode::Standard,
            buffer: String::new(),
            history: String::new(),
            state: EntryState::Entering,
            options,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    /// The history-line text to render; empty string if none.
    pub fn history_text(&self) -> &str {
        &self.history
    }

    /// The current-line text to render, clipped to MAX_DISPLAY_WIDTH.
    /// While entering, the window follows the end of the buffer (the
    /// cursor); results and errors show their leading characters.
    pub fn display_text(&self) -> String {
        if self.buffer.is_empty() && self.state == EntryState::Entering {
            return "0".to_string();
        }

        let len = self.buffer.chars().count();
        if len <= MAX_DISPLAY_WIDTH {
            return self.buffer.clone();
        }

        match self.state {
            EntryState::Entering => self.buffer.chars().skip(len - MAX_DISPLAY_WIDTH).collect(),
            _ => self.buffer.chars().take(MAX_DISPLAY_WIDTH).collect(),
        }
    }

    /// Applies one input event.
    pub fn apply(&mut self, event: InputEvent) {
        log::debug!("apply {:?} (state {:?})", event, self.state);

        match event {
            InputEvent::Digit(d) => self.insert_digit(d),
            InputEvent::Decimal => self.insert_decimal(),
            InputEvent::Operator(op) => self.insert_operator(op),
            InputEvent::Function(func) => {
                let mut atom = func.name().to_string();
                atom.push('(');
                self.insert_atom(&atom);
            }
            InputEvent::Constant(c) => self.insert_atom(c.name()),
            InputEvent::LeftParen => self.insert_atom("("),
            InputEvent::RightParen => self.insert_right_paren(),
            InputEvent::Clear => self.clear(),
            InputEvent::Backspace => self.backspace(),
            InputEvent::Evaluate => self.evaluate(),
            InputEvent::ToggleMode => self.toggle_mode(),
        }
    }

    fn insert_digit(&mut self, d: char) {
        if !d.is_ascii_digit() {
            return;
        }
        self.reset_stale_entry();
        self.buffer.push(d);
    }

    fn insert_decimal(&mut self) {
        self.reset_stale_entry();
        // Only one decimal point per numeric run
        if !self.trailing_number_run().contains('.') {
            self.buffer.push('.');
        }
    }

    fn insert_operator(&mut self, op: char) {
        if !is_operator_char(op) {
            return;
        }

        match self.state {
            // An error is not continuable with an operator
            EntryState::ShowingError => return,
            // An operator continues the expression from the previous result
            EntryState::ShowingResult => self.state = EntryState::Entering,
            EntryState::Entering => {}
        }

        if self.buffer.is_empty() {
            // No leading binary operator, except '-' for negation
            if op == '-' {
                self.buffer.push(op);
            }
            return;
        }

        let last = self.buffer.chars().last();
        if last.map(is_operator_char).unwrap_or(false) {
            // Overwrite, don't stack. Refuse when the replacement would
            // leave a leading binary operator (buffer is just "-").
            if self.buffer.chars().count() == 1 && op != '-' {
                return;
            }
            self.buffer.pop();
            self.buffer.push(op);
        } else {
            // Progressive fold: the sub-expression consumed before the
            // operator becomes the history line.
            self.history = self.buffer.clone();
            self.buffer.push(op);
        }
    }

    /// Appends a multi-character atom (function-with-paren, constant) or a
    /// left parenthesis. Starts a fresh expression after an error; after a
    /// result the atom extends the result text, and the adjacency is left
    /// to the evaluation-time policy.
    fn insert_atom(&mut self, text: &str) {
        match self.state {
            EntryState::ShowingError => {
                self.buffer.clear();
                self.state = EntryState::Entering;
            }
            EntryState::ShowingResult => self.state = EntryState::Entering,
            EntryState::Entering => {}
        }
        self.buffer.push_str(text);
    }

    fn insert_right_paren(&mut self) {
        if self.state == EntryState::ShowingError {
            return;
        }
        if self.state == EntryState::ShowingResult {
            self.state = EntryState::Entering;
        }
        self.buffer.push(')');
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.history.clear();
        self.state = EntryState::Entering;
    }

    fn backspace(&mut self) {
        if self.state == EntryState::ShowingError {
            // An error is not edit-resumable character-by-character
            self.buffer.clear();
        } else {
            self.buffer.pop();
        }
        self.state = EntryState::Entering;
    }

    fn evaluate(&mut self) {
        let source = self.buffer.clone();
        match evaluator::evaluate_with(&source, self.options) {
            Ok(formatted) => {
                self.history = source;
                self.buffer = formatted;
                self.state = EntryState::ShowingResult;
            }
            Err(err) => {
                self.on_eval_error(&err);
            }
        }
    }

    fn on_eval_error(&mut self, err: &EvalError) {
        log::debug!("evaluation failed: {}", err);
        self.history.clear();
        self.buffer = ERROR_MARKER.to_string();
        self.state = EntryState::ShowingError;
    }

    fn toggle_mode(&mut self) {
        // Mode never touches buffer or history
        self.mode = match self.mode {
            Mode::Standard => Mode::Scientific,
            Mode::Scientific => Mode::Standard,
        };
    }

    /// Digits and the decimal point start a new expression when the buffer
    /// holds a stale result or error.
    fn reset_stale_entry(&mut self) {
        if self.state != EntryState::Entering {
            self.buffer.clear();
            self.state = EntryState::Entering;
        }
    }

    /// The maximal trailing digit/decimal-point substring of the buffer.
    fn trailing_number_run(&self) -> &str {
        let run_start = self
            .buffer
            .rfind(|c: char| !c.is_ascii_digit() && c != '.')
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.buffer[run_start..]
    }
}

/// Binary operator characters for insertion rules. '%' participates here
/// even though it evaluates as a postfix: two in a row are never legal.
fn is_operator_char(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^' | '%')
}
