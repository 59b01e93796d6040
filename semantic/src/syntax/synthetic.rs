//! Detached references built from template text such as `items().xxx`.

use super::reference::{Reference, Segment};
use super::{NodeId, SyntaxTree};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntheticError {
    #[error("empty reference template")]
    Empty,
    #[error("expected an identifier at byte {at} of `{template}`")]
    ExpectedIdent { template: String, at: usize },
    #[error("unexpected `{found}` at byte {at} of `{template}`")]
    UnexpectedChar {
        template: String,
        at: usize,
        found: char,
    },
    #[error("`{template}` ends in a call, not a member reference")]
    EndsInCall { template: String },
    #[error("anchor {0:?} is not a node of this tree")]
    DetachedAnchor(NodeId),
}

impl SyntheticError {
    /// Template rejections are routine; a bad anchor points at a caller bug.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, SyntheticError::DetachedAnchor(_))
    }
}

/// Builds a reference from `template`, resolved in the scope of `anchor`.
///
/// Accepted shape: identifiers joined by `.`, where every step except the
/// last may be an argument-less call (`name()`, `name( )`). The result is
/// never attached to `tree`.
pub fn build_synthetic_reference(
    tree: &SyntaxTree,
    template: &str,
    anchor: NodeId,
) -> Result<Reference, SyntheticError> {
    if !tree.contains(anchor) {
        return Err(SyntheticError::DetachedAnchor(anchor));
    }
    if template.trim().is_empty() {
        return Err(SyntheticError::Empty);
    }

    let mut scanner = Scanner {
        template,
        pos: 0,
    };
    let mut segments = Vec::new();
    loop {
        scanner.skip_ws();
        let name = scanner.ident()?;
        scanner.skip_ws();
        let segment = if scanner.eat('(') {
            scanner.skip_ws();
            scanner.expect(')')?;
            scanner.skip_ws();
            Segment::Call(name)
        } else {
            Segment::Name(name)
        };
        segments.push(segment);

        if scanner.at_end() {
            break;
        }
        scanner.expect('.')?;
    }

    let name = match segments.pop() {
        Some(Segment::Name(name)) => name,
        Some(Segment::Call(_)) => {
            return Err(SyntheticError::EndsInCall {
                template: template.to_string(),
            });
        }
        None => return Err(SyntheticError::Empty),
    };

    Ok(Reference {
        anchor,
        qualifier: segments,
        name,
        synthetic: true,
    })
}

struct Scanner<'a> {
    template: &'a str,
    pos: usize,
}

impl Scanner<'_> {
    fn peek(&self) -> Option<char> {
        self.template[self.pos..].chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.template.len()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek()
            && c.is_whitespace()
        {
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), SyntheticError> {
        if self.eat(expected) {
            return Ok(());
        }
        Err(match self.peek() {
            Some(found) => SyntheticError::UnexpectedChar {
                template: self.template.to_string(),
                at: self.pos,
                found,
            },
            None => SyntheticError::ExpectedIdent {
                template: self.template.to_string(),
                at: self.pos,
            },
        })
    }

    fn ident(&mut self) -> Result<String, SyntheticError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if is_ident_start(c) => self.pos += c.len_utf8(),
            _ => {
                return Err(SyntheticError::ExpectedIdent {
                    template: self.template.to_string(),
                    at: start,
                });
            }
        }
        while let Some(c) = self.peek()
            && is_ident_part(c)
        {
            self.pos += c.len_utf8();
        }
        Ok(self.template[start..self.pos].to_string())
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
