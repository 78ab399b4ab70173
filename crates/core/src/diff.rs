//! Edit script and clause-row data model

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

use crate::delta::ContentWordDelta;
use crate::indicators::Indicator;

/// Kind of edit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// Token present in both sequences
    Equal,
    /// Token present only in the current sequence
    Insert,
    /// Token present only in the baseline sequence
    Delete,
}

impl EditKind {
    /// Wire symbol used in the serialized word diff
    pub fn symbol(&self) -> &'static str {
        match self {
            EditKind::Equal => "=",
            EditKind::Insert => "+",
            EditKind::Delete => "-",
        }
    }
}

/// One word-level edit operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOp {
    pub kind: EditKind,
    pub token: String,
}

impl EditOp {
    pub fn new(kind: EditKind, token: impl Into<String>) -> Self {
        Self { kind, token: token.into() }
    }
}

// Serialized as an `(op, token)` pair, op ∈ {"=", "+", "-"}.
impl Serialize for EditOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(self.kind.symbol())?;
        pair.serialize_element(&self.token)?;
        pair.end()
    }
}

/// A word-level edit script.
///
/// Totally ordered; filtering by kind reconstructs either input sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EditScript {
    pub ops: Vec<EditOp>,
}

impl EditScript {
    pub fn new(ops: Vec<EditOp>) -> Self {
        Self { ops }
    }

    /// Tokens of the baseline sequence (Equal ∪ Delete, in order)
    pub fn baseline_tokens(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter(|op| matches!(op.kind, EditKind::Equal | EditKind::Delete))
            .map(|op| op.token.as_str())
            .collect()
    }

    /// Tokens of the current sequence (Equal ∪ Insert, in order)
    pub fn current_tokens(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter(|op| matches!(op.kind, EditKind::Equal | EditKind::Insert))
            .map(|op| op.token.as_str())
            .collect()
    }

    /// Length of the longest common subsequence underlying this script
    pub fn lcs_len(&self) -> usize {
        self.ops.iter().filter(|op| op.kind == EditKind::Equal).count()
    }

    /// Whether the script contains no changes
    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(|op| op.kind == EditKind::Equal)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// One contiguous region of change, spanning from one stable boundary to
/// the next. Either side may be empty (pure insertion or deletion).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClauseRow {
    /// Text removed from the baseline (space-joined diff tokens)
    pub removed: String,
    /// Text added in the current text
    pub added: String,
}

impl ClauseRow {
    pub fn new(removed: impl Into<String>, added: impl Into<String>) -> Self {
        Self { removed: removed.into(), added: added.into() }
    }

    /// A replacement row has text on both sides
    pub fn is_replacement(&self) -> bool {
        !self.removed.is_empty() && !self.added.is_empty()
    }
}

/// A clause row decorated with its structural-shift labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledRow {
    pub removed: String,
    pub added: String,
    /// Labels in fixed evaluation order; empty when nothing fired or the
    /// row was not a replacement
    pub indicators: Vec<Indicator>,
}

impl LabeledRow {
    pub fn unlabeled(row: &ClauseRow) -> Self {
        Self {
            removed: row.removed.clone(),
            added: row.added.clone(),
            indicators: Vec::new(),
        }
    }
}

/// Complete output of one structural shift analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftReport {
    /// Word-level edit script as `(op, token)` pairs
    pub word_diff: EditScript,
    /// Mode-filtered clause rows
    pub rows: Vec<ClauseRow>,
    /// The same rows decorated with micro-indicator labels
    pub labeled_rows: Vec<LabeledRow>,
    /// Content-word set delta between the two texts
    pub delta: ContentWordDelta,
}
