use super::{NodeId, NodeKind, SyntaxTree};
use std::fmt;

/// One step of a reference qualifier: `name` or `name()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Name(String),
    Call(String),
}

impl Segment {
    pub fn name(&self) -> &str {
        match self {
            Segment::Name(name) | Segment::Call(name) => name,
        }
    }
}

/// A named use-site, optionally qualified (`a.b().name`).
///
/// `anchor` is the node whose scope the reference is resolved in. Synthetic
/// references are built from text and share the anchor of a real node; they
/// are never part of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub anchor: NodeId,
    pub qualifier: Vec<Segment>,
    pub name: String,
    pub synthetic: bool,
}

impl Reference {
    /// Reads a `ReferenceExpression` node.
    ///
    /// Qualifiers that are not plain names or argument-less calls make the
    /// reference unreadable (`None`).
    pub fn from_node(tree: &SyntaxTree, node: NodeId) -> Option<Reference> {
        if !tree.is_kind(node, NodeKind::ReferenceExpression) {
            return None;
        }
        let children = tree.children(node);
        let name_leaf = children
            .iter()
            .rev()
            .find(|child| tree.is_kind(**child, NodeKind::Identifier))?;
        let name = tree.leaf_text(*name_leaf)?.to_string();

        let qualifier = match children.first() {
            Some(first) if first != name_leaf => qualifier_segments(tree, *first)?,
            _ => Vec::new(),
        };

        Some(Reference {
            anchor: node,
            qualifier,
            name,
            synthetic: false,
        })
    }

    pub fn is_qualified(&self) -> bool {
        !self.qualifier.is_empty()
    }
}

fn qualifier_segments(tree: &SyntaxTree, node: NodeId) -> Option<Vec<Segment>> {
    match tree.kind(node)? {
        NodeKind::ReferenceExpression => {
            let reference = Reference::from_node(tree, node)?;
            let mut segments = reference.qualifier;
            segments.push(Segment::Name(reference.name));
            Some(segments)
        }
        NodeKind::MethodCall => {
            let children = tree.children(node);
            let callee = *children.first()?;
            // callee `(` `)` and nothing else
            if children.len() != 3 {
                return None;
            }
            let mut segments = qualifier_segments(tree, callee)?;
            match segments.pop()? {
                Segment::Name(name) => segments.push(Segment::Call(name)),
                Segment::Call(_) => return None,
            }
            Some(segments)
        }
        _ => None,
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.qualifier {
            match segment {
                Segment::Name(name) => write!(f, "{name}.")?,
                Segment::Call(name) => write!(f, "{name}().")?,
            }
        }
        f.write_str(&self.name)
    }
}
