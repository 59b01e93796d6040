use crate::span::Span;
use serde::{Deserialize, Serialize};

/// A single text edit in byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub range: Span,
    pub new_text: String,
}

impl TextEdit {
    pub fn insert(at: u32, text: impl Into<String>) -> Self {
        Self {
            range: Span::empty(at),
            new_text: text.into(),
        }
    }

    pub fn replace(range: Span, text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: text.into(),
        }
    }
}

/// Rebases a byte offset through edits expressed in original coordinates.
///
/// The caller must provide non-overlapping edits sorted by `(start, end)`.
///
/// Offset rules:
/// - edits ending at or before the offset shift it by their byte delta
/// - an offset strictly inside a replaced range snaps to the edit `start`
pub fn rebase_offset(offset: u32, edits: &[TextEdit]) -> u32 {
    let mut rebased = offset;
    for edit in edits.iter().rev() {
        let start = edit.range.start;
        let end = edit.range.end;
        let replaced_len = end.saturating_sub(start);
        let inserted_len = edit.new_text.len() as u32;
        let delta = inserted_len as i64 - replaced_len as i64;

        if end <= offset {
            rebased = if delta >= 0 {
                rebased.saturating_add(delta as u32)
            } else {
                rebased.saturating_sub((-delta) as u32)
            };
        } else if start < offset && offset < end {
            rebased = start;
        }
    }
    rebased
}

/// Applies byte-offset text edits and rebases a byte cursor through them.
///
/// The caller must provide non-overlapping edits sorted by `(start, end)`.
/// Edits are applied in descending order to avoid shifting later offsets.
pub fn apply_text_edits(source: &str, edits: &[TextEdit], cursor: u32) -> (String, u32) {
    let mut updated = source.to_string();
    for edit in edits.iter().rev() {
        let start = (edit.range.start as usize).min(updated.len());
        let end = (edit.range.end as usize).clamp(start, updated.len());

        let mut next = String::with_capacity(updated.len() - (end - start) + edit.new_text.len());
        next.push_str(&updated[..start]);
        next.push_str(&edit.new_text);
        next.push_str(&updated[end..]);
        updated = next;
    }

    (updated, rebase_offset(cursor, edits))
}
