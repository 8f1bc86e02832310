//! Deterministic command ordering
//!
//! All commands are known up front, so ordering is a stable sort over a
//! permutation of indices; the input slice is never touched.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::command::{Command, CommandError};
use crate::error::{EditorError, EditorResult};

/// How sequence keys are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOrdering {
    /// Numeric when every key in the batch is an integer, textual otherwise
    #[default]
    Auto,
    /// Byte-wise comparison of the raw key text
    Lexicographic,
    /// Integer comparison; a non-integer key is malformed
    Numeric,
}

/// Stateless command sorter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scheduler {
    ordering: KeyOrdering,
}

impl Scheduler {
    pub const fn new(ordering: KeyOrdering) -> Self {
        Self { ordering }
    }

    pub fn ordering(&self) -> KeyOrdering {
        self.ordering
    }

    /// Order `commands` ascending by key, keeping input order among equal keys
    pub fn order<'a>(&self, commands: &'a [Command]) -> EditorResult<OrderedCommands<'a>> {
        let numeric = match self.ordering {
            KeyOrdering::Lexicographic => false,
            KeyOrdering::Auto => commands.iter().all(|c| c.key().numeric().is_some()),
            KeyOrdering::Numeric => {
                if let Some(index) = commands.iter().position(|c| c.key().numeric().is_none()) {
                    return Err(EditorError::InvalidCommand {
                        index,
                        source: CommandError::InvalidKey(commands[index].key().to_string()),
                    });
                }
                true
            }
        };

        let mut order: Vec<usize> = (0..commands.len()).collect();
        order.sort_by(|&a, &b| compare(&commands[a], &commands[b], numeric));

        Ok(OrderedCommands {
            commands,
            order: order.into_iter(),
        })
    }
}

fn compare(a: &Command, b: &Command, numeric: bool) -> Ordering {
    match (numeric, a.key().numeric(), b.key().numeric()) {
        (true, Some(x), Some(y)) => x.cmp(&y),
        _ => a.key().as_str().cmp(b.key().as_str()),
    }
}

/// Lazy view of a batch in execution order
#[derive(Debug, Clone)]
pub struct OrderedCommands<'a> {
    commands: &'a [Command],
    order: std::vec::IntoIter<usize>,
}

impl<'a> Iterator for OrderedCommands<'a> {
    type Item = &'a Command;

    fn next(&mut self) -> Option<Self::Item> {
        self.order.next().map(|index| &self.commands[index])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl ExactSizeIterator for OrderedCommands<'_> {}
