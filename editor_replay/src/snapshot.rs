//! Session snapshot for deterministic parity testing

use serde::{Deserialize, Serialize};

use crate::buffer::{Selection, StyledRange};

/// Complete session state, including history depths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub text: String,
    pub selection: Option<Selection>,
    pub styled_ranges: Vec<StyledRange>,
    pub undo_depth: usize,
    pub redo_depth: usize,
}

impl SessionSnapshot {
    /// Compute a deterministic hash of the snapshot state
    /// This is used for fast comparison in parity tests
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();

        hasher.update(self.text.as_bytes());
        hasher.update(b"\0");

        match self.selection {
            Some(sel) => {
                hasher.update([1u8]);
                hasher.update(sel.start.to_le_bytes());
                hasher.update(sel.end.to_le_bytes());
            }
            None => hasher.update([0u8]),
        }

        for range in &self.styled_ranges {
            hasher.update(range.start.to_le_bytes());
            hasher.update(range.end.to_le_bytes());
            hasher.update([range.style as u8]);
        }

        hasher.update(self.undo_depth.to_le_bytes());
        hasher.update(self.redo_depth.to_le_bytes());

        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        u64::from_le_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(text: &str, selection: Option<Selection>) -> SessionSnapshot {
        SessionSnapshot {
            text: text.to_string(),
            selection,
            styled_ranges: Vec::new(),
            undo_depth: 0,
            redo_depth: 0,
        }
    }

    #[test]
    fn test_snapshot_hash_deterministic() {
        let snap = snapshot("hello", None);
        assert_eq!(snap.hash(), snap.clone().hash(), "Hash should be deterministic");
    }

    #[test]
    fn test_snapshot_hash_distinguishes_caret_at_zero() {
        let none = snapshot("hello", None);
        let caret = snapshot("hello", Some(Selection::new(0, 0)));
        assert_ne!(none.hash(), caret.hash());
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let snap = snapshot("héllo", Some(Selection::new(1, 3)));
        let json = serde_json::to_string(&snap).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
