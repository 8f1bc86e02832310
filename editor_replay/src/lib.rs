//! # Editor Replay
//!
//! Applies a batch of timestamped editing commands to an in-memory text
//! buffer and produces the resulting document.
//!
//! ## Philosophy
//!
//! - **Deterministic**: Same batch => same document, every time
//! - **Exact undo**: Every edit snapshots the state it replaced
//! - **Fail fast on bad input**: Malformed records abort the run before any edit
//! - **Quiet no-ops**: Benign conditions (empty undo stack, bold without a
//!   selection) are ignored, never errors
//! - **No ambient state**: Each session owns its buffer and history
//!
//! ## Design
//!
//! - Command: Parsed `(key, kind, ...args)` record with a typed payload
//! - Scheduler: Stable ordering by sequence key
//! - Buffer: Text, selection and style marks
//! - History: Undo stack of (command, pre-state) entries and a redo stack of commands
//! - Interpreter: Dispatch table and run loop
//!
//! ## Example
//!
//! ```
//! use editor_replay::replay;
//!
//! let output = replay(&[
//!     vec!["1", "APPEND", "hello"],
//!     vec!["2", "SELECT", "1", "3"],
//!     vec!["3", "APPEND", "XY"],
//! ])
//! .unwrap();
//! assert_eq!(output.text, "hXYlo");
//! ```

pub mod buffer;
pub mod command;
pub mod config;
pub mod error;
pub mod history;
pub mod interpreter;
pub mod scheduler;
pub mod snapshot;

pub use buffer::{Buffer, Selection, Style, StyledRange};
pub use command::{parse_batch, Action, Command, CommandError, CommandKind, SequenceKey};
pub use config::EditorConfig;
pub use error::{ConfigError, EditorError, EditorResult};
pub use history::{BufferState, History, HistoryEntry};
pub use interpreter::{replay, Dispatch, Interpreter, RunOutput};
pub use scheduler::{KeyOrdering, OrderedCommands, Scheduler};
pub use snapshot::SessionSnapshot;
