//! Command interpreter
//!
//! The machine state is the buffer (text, selection, style marks) plus the
//! two history stacks. Each command is applied to completion before the next.

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use crate::buffer::{Buffer, Style, StyledRange};
use crate::command::{parse_batch, Action, Command};
use crate::config::EditorConfig;
use crate::error::EditorResult;
use crate::history::{BufferState, History};
use crate::scheduler::Scheduler;
use crate::snapshot::SessionSnapshot;

/// Outcome of dispatching a single command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The command changed session state
    Applied,
    /// The command hit a benign no-op condition
    Ignored,
}

/// Final document state handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutput {
    pub text: String,
    pub styled_ranges: Vec<StyledRange>,
}

/// One editing session: a buffer and its history
///
/// Sessions share nothing; run independent batches on independent sessions.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    buffer: Buffer,
    history: History,
    config: EditorConfig,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EditorConfig) -> EditorResult<Self> {
        config.validate()?;
        Ok(Self {
            buffer: Buffer::new(),
            history: History::with_limit(config.history_limit),
            config,
        })
    }

    /// Session starting from existing text
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            buffer: Buffer::with_content(content),
            ..Self::default()
        }
    }

    /// Configured session starting from existing text
    pub fn with_config_and_content(
        config: EditorConfig,
        content: impl Into<String>,
    ) -> EditorResult<Self> {
        let mut editor = Self::with_config(config)?;
        editor.buffer = Buffer::with_content(content);
        Ok(editor)
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replace the buffer content and forget all history
    pub fn load_content(&mut self, content: impl Into<String>) {
        self.buffer = Buffer::with_content(content);
        self.history.clear();
    }

    /// Order `commands` and apply them front to back
    pub fn run(&mut self, commands: &[Command]) -> EditorResult<RunOutput> {
        let span = info_span!("run", commands = commands.len());
        let _enter = span.enter();

        let ordered = Scheduler::new(self.config.key_ordering).order(commands)?;
        for command in ordered {
            self.dispatch(command);
        }

        debug!(
            len = self.buffer.len(),
            undo_depth = self.history.undo_depth(),
            redo_depth = self.history.redo_depth(),
            "run complete"
        );
        Ok(self.output())
    }

    /// Parse raw `(key, kind, ...args)` records and run them
    ///
    /// A malformed record aborts before any command is applied.
    pub fn run_records<R, S>(&mut self, records: &[R]) -> EditorResult<RunOutput>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let commands = parse_batch(records)?;
        self.run(&commands)
    }

    /// Apply one command
    pub fn dispatch(&mut self, command: &Command) -> Dispatch {
        debug!(key = %command.key(), kind = %command.kind(), "dispatch");

        match command.action() {
            Action::Append(_) | Action::Backspace => {
                self.history.record(command.clone(), BufferState::capture(&self.buffer));
                Self::apply_mutation(&mut self.buffer, command);
                Dispatch::Applied
            }
            Action::Undo => {
                if self.history.undo(&mut self.buffer) {
                    Dispatch::Applied
                } else {
                    debug!("undo ignored: nothing to undo");
                    Dispatch::Ignored
                }
            }
            Action::Redo => {
                if self.history.redo(&mut self.buffer, Self::apply_mutation) {
                    Dispatch::Applied
                } else {
                    debug!("redo ignored: nothing to redo");
                    Dispatch::Ignored
                }
            }
            Action::Select { start, end } => {
                if self.buffer.set_selection(*start, *end) {
                    Dispatch::Applied
                } else {
                    debug!(start, end, "select ignored: bounds out of range");
                    Dispatch::Ignored
                }
            }
            Action::Bold => {
                if self.buffer.mark_style(Style::Bold) {
                    Dispatch::Applied
                } else {
                    debug!("bold ignored: no selection");
                    Dispatch::Ignored
                }
            }
        }
    }

    /// Final text and style marks
    pub fn output(&self) -> RunOutput {
        RunOutput {
            text: self.buffer.text().to_string(),
            styled_ranges: self.buffer.styled_ranges().iter().copied().collect(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            text: self.buffer.text().to_string(),
            selection: self.buffer.selection(),
            styled_ranges: self.buffer.styled_ranges().iter().copied().collect(),
            undo_depth: self.history.undo_depth(),
            redo_depth: self.history.redo_depth(),
        }
    }

    /// Text-changing half of the dispatch table, shared with redo
    fn apply_mutation(buffer: &mut Buffer, command: &Command) {
        match command.action() {
            Action::Append(text) => buffer.insert(text),
            Action::Backspace => buffer.delete_backward(),
            // Only mutating commands are ever recorded
            Action::Undo | Action::Redo | Action::Select { .. } | Action::Bold => {}
        }
    }
}

/// Run a batch of raw records on a fresh default session
pub fn replay<R, S>(records: &[R]) -> EditorResult<RunOutput>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    Interpreter::new().run_records(records)
}
