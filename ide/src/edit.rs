//! Editor-side operations used while inserting a candidate.

use semantic::{Span, TextEdit, apply_text_edits};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenError {
    #[error("range {start}..{end} is outside the document")]
    OutOfBounds { start: u32, end: u32 },
    #[error("`{text}` is not a qualified name")]
    NotQualified { text: String },
    #[error("`{simple}` is already imported as `{existing}`")]
    Conflict { simple: String, existing: String },
}

/// Document access for the insertion subsystem.
pub trait Editor {
    fn text(&self) -> &str;

    fn insert(&mut self, offset: u32, text: &str);

    /// Replaces the qualified name in `range` with its simple name, importing
    /// it if needed. Returns the applied edits in original coordinates.
    fn shorten_references(&mut self, range: Span) -> Result<Vec<TextEdit>, ShortenError>;

    fn flush_formatting(&mut self);
}

/// In-memory editor over a single source file.
#[derive(Debug, Clone, Default)]
pub struct BufferEditor {
    text: String,
    formatting_flushes: usize,
}

impl BufferEditor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            formatting_flushes: 0,
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn formatting_flushes(&self) -> usize {
        self.formatting_flushes
    }

    /// Existing single-type imports with the byte offset right after the last one.
    fn imports(&self) -> (Vec<&str>, Option<u32>) {
        let mut imports = Vec::new();
        let mut after_imports = None;
        let mut after_package = None;
        let mut offset = 0usize;
        for line in self.text.split_inclusive('\n') {
            offset += line.len();
            let trimmed = line.trim();
            if let Some(name) = trimmed
                .strip_prefix("import ")
                .and_then(|rest| rest.strip_suffix(';'))
            {
                imports.push(name.trim());
                after_imports = Some(offset as u32);
            } else if trimmed.starts_with("package ") {
                after_package = Some(offset as u32);
            }
        }
        (imports, after_imports.or(after_package))
    }
}

impl Editor for BufferEditor {
    fn text(&self) -> &str {
        &self.text
    }

    fn insert(&mut self, offset: u32, text: &str) {
        let mut at = (offset as usize).min(self.text.len());
        while !self.text.is_char_boundary(at) {
            at -= 1;
        }
        self.text.insert_str(at, text);
    }

    fn shorten_references(&mut self, range: Span) -> Result<Vec<TextEdit>, ShortenError> {
        let qualified = self
            .text
            .get(range.start as usize..range.end as usize)
            .ok_or(ShortenError::OutOfBounds {
                start: range.start,
                end: range.end,
            })?
            .to_string();
        let Some((_, simple)) = qualified.rsplit_once('.') else {
            return Err(ShortenError::NotQualified { text: qualified });
        };

        let (imports, insert_at) = self.imports();
        let mut already_imported = false;
        for import in imports {
            if import == qualified {
                already_imported = true;
            } else if import.rsplit('.').next() == Some(simple) {
                return Err(ShortenError::Conflict {
                    simple: simple.to_string(),
                    existing: import.to_string(),
                });
            }
        }

        let mut edits = Vec::new();
        if !already_imported {
            edits.push(TextEdit::insert(
                insert_at.unwrap_or(0),
                format!("import {qualified};\n"),
            ));
        }
        edits.push(TextEdit::replace(range, simple));
        edits.sort_by_key(|edit| (edit.range.start, edit.range.end));

        let (updated, _) = apply_text_edits(&self.text, &edits, 0);
        self.text = updated;
        Ok(edits)
    }

    fn flush_formatting(&mut self) {
        self.formatting_flushes += 1;
    }
}
