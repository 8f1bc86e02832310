//! Command records and parsing
//!
//! A record arrives as an ordered tuple of strings: `(key, kind, ...args)`.
//! Arguments are parsed once, here, into a typed [`Action`].

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::error::{EditorError, EditorResult};

/// Record parsing error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty record")]
    EmptyRecord,

    #[error("Missing command kind")]
    MissingKind,

    #[error("Invalid sequence key: {0:?}")]
    InvalidKey(String),

    #[error("Unknown command kind: {0}")]
    UnknownKind(String),

    #[error("{kind} expects {expected} argument(s), found {found}")]
    Arity {
        kind: CommandKind,
        expected: usize,
        found: usize,
    },

    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),
}

/// Command kind as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Append,
    Backspace,
    Undo,
    Redo,
    Select,
    Bold,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Append => "APPEND",
            CommandKind::Backspace => "BACKSPACE",
            CommandKind::Undo => "UNDO",
            CommandKind::Redo => "REDO",
            CommandKind::Select => "SELECT",
            CommandKind::Bold => "BOLD",
        }
    }

    /// Number of arguments the kind takes
    pub fn arity(&self) -> usize {
        match self {
            CommandKind::Append => 1,
            CommandKind::Select => 2,
            CommandKind::Backspace | CommandKind::Undo | CommandKind::Redo | CommandKind::Bold => 0,
        }
    }

    /// True for kinds that alter buffer text and are recorded for undo
    pub fn is_mutating(&self) -> bool {
        matches!(self, CommandKind::Append | CommandKind::Backspace)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPEND" => Ok(CommandKind::Append),
            "BACKSPACE" => Ok(CommandKind::Backspace),
            "UNDO" => Ok(CommandKind::Undo),
            "REDO" => Ok(CommandKind::Redo),
            "SELECT" => Ok(CommandKind::Select),
            "BOLD" => Ok(CommandKind::Bold),
            _ => Err(CommandError::UnknownKind(s.to_string())),
        }
    }
}

/// Typed command payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Insert text (replacing the selection, if any)
    Append(String),
    /// Delete one character, or the selection
    Backspace,
    Undo,
    Redo,
    /// Select `[start, end)`; bounds are validated by the buffer
    Select { start: i64, end: i64 },
    /// Mark the selection bold
    Bold,
}

impl Action {
    pub fn kind(&self) -> CommandKind {
        match self {
            Action::Append(_) => CommandKind::Append,
            Action::Backspace => CommandKind::Backspace,
            Action::Undo => CommandKind::Undo,
            Action::Redo => CommandKind::Redo,
            Action::Select { .. } => CommandKind::Select,
            Action::Bold => CommandKind::Bold,
        }
    }
}

/// Ordering key of a command
///
/// Keeps the raw text and, when the whole text is an integer, its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceKey {
    raw: String,
    numeric: Option<i64>,
}

impl SequenceKey {
    pub fn parse(raw: &str) -> Result<Self, CommandError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CommandError::InvalidKey(raw.to_string()));
        }
        Ok(Self {
            raw: trimmed.to_string(),
            numeric: trimmed.parse().ok(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn numeric(&self) -> Option<i64> {
        self.numeric
    }
}

impl fmt::Display for SequenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<i64> for SequenceKey {
    fn from(value: i64) -> Self {
        Self {
            raw: value.to_string(),
            numeric: Some(value),
        }
    }
}

/// A parsed, immutable editing instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    key: SequenceKey,
    action: Action,
}

impl Command {
    pub fn new(key: impl Into<SequenceKey>, action: Action) -> Self {
        Self {
            key: key.into(),
            action,
        }
    }

    /// Parse one record `(key, kind, ...args)`
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, CommandError> {
        let (key, rest) = fields.split_first().ok_or(CommandError::EmptyRecord)?;
        let (kind, args) = rest.split_first().ok_or(CommandError::MissingKind)?;

        let key = SequenceKey::parse(key.as_ref())?;
        let kind: CommandKind = kind.as_ref().parse()?;

        if args.len() != kind.arity() {
            return Err(CommandError::Arity {
                kind,
                expected: kind.arity(),
                found: args.len(),
            });
        }

        let action = match kind {
            CommandKind::Append => Action::Append(args[0].as_ref().to_string()),
            CommandKind::Backspace => Action::Backspace,
            CommandKind::Undo => Action::Undo,
            CommandKind::Redo => Action::Redo,
            CommandKind::Select => Action::Select {
                start: parse_index(args[0].as_ref())?,
                end: parse_index(args[1].as_ref())?,
            },
            CommandKind::Bold => Action::Bold,
        };

        Ok(Self { key, action })
    }

    pub fn key(&self) -> &SequenceKey {
        &self.key
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn kind(&self) -> CommandKind {
        self.action.kind()
    }
}

fn parse_index(arg: &str) -> Result<i64, CommandError> {
    arg.trim()
        .parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

/// Parse a whole batch, failing on the first malformed record
pub fn parse_batch<R, S>(records: &[R]) -> EditorResult<Vec<Command>>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Command::from_fields(record.as_ref())
                .map_err(|source| EditorError::InvalidCommand { index, source })
        })
        .collect()
}
