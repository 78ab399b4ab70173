//! Clause-level grouping of edit scripts
//!
//! The word-level edit script is too granular for display: a clause
//! rewrite appears as a run of single-word insertions and deletions.
//! Grouping collects each contiguous change region (between stable Equal
//! boundaries) into one removed/added row.

use crate::diff::{ClauseRow, EditKind, EditScript};

/// Which flushed rows are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowMode {
    /// Keep only rows with text on both sides (default)
    #[default]
    ReplacementsOnly,
    /// Keep every change region, including pure insertions and deletions;
    /// the caller renders the empty side as an explicit absence marker
    AllChanges,
}

/// Group an edit script into clause rows.
///
/// Deletes accumulate on the removed side and Inserts on the added side;
/// an Equal token flushes the pending region, and a final flush captures a
/// trailing change. Tokens within a side are joined with single spaces, so
/// concatenating all rows' removed sides (before mode filtering drops
/// whole rows) reproduces the script's Delete tokens in order, and
/// likewise for added sides and Insert tokens.
pub fn group_rows(script: &EditScript, mode: RowMode) -> Vec<ClauseRow> {
    let mut rows = Vec::new();
    let mut removed: Vec<&str> = Vec::new();
    let mut added: Vec<&str> = Vec::new();

    for op in &script.ops {
        match op.kind {
            EditKind::Delete => removed.push(&op.token),
            EditKind::Insert => added.push(&op.token),
            EditKind::Equal => flush(&mut removed, &mut added, mode, &mut rows),
        }
    }
    flush(&mut removed, &mut added, mode, &mut rows);

    rows
}

fn flush(removed: &mut Vec<&str>, added: &mut Vec<&str>, mode: RowMode, rows: &mut Vec<ClauseRow>) {
    if removed.is_empty() && added.is_empty() {
        return;
    }

    let row = ClauseRow::new(removed.join(" "), added.join(" "));
    removed.clear();
    added.clear();

    match mode {
        RowMode::ReplacementsOnly if !row.is_replacement() => {}
        _ => rows.push(row),
    }
}
