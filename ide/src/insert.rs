//! Insertion commands: what picking a candidate does to the document.
//!
//! Derivation only describes the edit; [`apply`] performs it later, in the
//! editor's write phase.

use crate::edit::Editor;
use semantic::{Span, rebase_offset};
use serde::{Deserialize, Serialize};

/// Text appended after a candidate is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TailPolicy {
    None,
    /// Append `;`, or step over one that is already there.
    Semicolon,
    /// Left to the completion character the user finishes with.
    UnknownDefer,
}

/// Request to write the utility class fully qualified and then shorten it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualification {
    /// Inserted in front of the candidate text, e.g. `java.util.`.
    pub package_prefix: String,
    /// Byte length of the qualified name to shorten (`java.util.Arrays`).
    pub qualified_len: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertCommand {
    pub text: String,
    /// Caret position relative to the start of `text`.
    pub caret: u32,
    pub tail: TailPolicy,
    pub qualification: Option<Qualification>,
}

impl InsertCommand {
    /// Inserts `text` and leaves the caret after it.
    pub fn plain(text: String, tail: TailPolicy) -> Self {
        Self {
            caret: text.len() as u32,
            text,
            tail,
            qualification: None,
        }
    }

    pub fn with_caret(mut self, caret: u32) -> Self {
        self.caret = caret.min(self.text.len() as u32);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
    pub caret: u32,
    /// End of the inserted text, after any tail.
    pub tail: u32,
}

/// Performs `command` at byte offset `start`.
///
/// Shortening failures are logged and leave the qualified text in place; the
/// insertion itself still succeeds.
pub fn apply(command: &InsertCommand, start: u32, editor: &mut dyn Editor) -> InsertOutcome {
    editor.insert(start, &command.text);
    let mut caret = start + command.caret;
    let mut tail = start + command.text.len() as u32;

    if let Some(qualification) = &command.qualification {
        editor.insert(start, &qualification.package_prefix);
        let shift = qualification.package_prefix.len() as u32;
        caret += shift;
        tail += shift;

        let qualified = Span {
            start,
            end: start + qualification.qualified_len,
        };
        match editor.shorten_references(qualified) {
            Ok(edits) => {
                caret = rebase_offset(caret, &edits);
                tail = rebase_offset(tail, &edits);
            }
            Err(err) => tracing::error!(%err, "failed to shorten inserted reference"),
        }
    }

    editor.flush_formatting();

    let end = apply_tail(command.tail, tail, editor);
    if caret == tail {
        caret = end;
    }
    InsertOutcome { caret, tail: end }
}

fn apply_tail(policy: TailPolicy, at: u32, editor: &mut dyn Editor) -> u32 {
    match policy {
        TailPolicy::Semicolon => {
            let rest = editor.text().get(at as usize..).unwrap_or_default();
            let trimmed = rest.trim_start_matches([' ', '\t']);
            if trimmed.starts_with(';') {
                at + (rest.len() - trimmed.len()) as u32 + 1
            } else {
                editor.insert(at, ";");
                at + 1
            }
        }
        TailPolicy::None | TailPolicy::UnknownDefer => at,
    }
}
