use super::{Declaration, NodeData, NodeId, NodeKind, SyntaxTree};
use crate::span::Span;

/// Event-style builder for [`SyntaxTree`].
///
/// Tokens are laid out left to right separated by a single space; composite
/// spans cover their first through last token. The root is a `File` node that
/// is open from the start.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
    leaves: Vec<NodeId>,
    text: String,
    stack: Vec<NodeId>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        let mut builder = Self {
            nodes: Vec::new(),
            leaves: Vec::new(),
            text: String::new(),
            stack: Vec::new(),
        };
        let root = builder.push(NodeKind::File, Span::empty(0), None);
        builder.stack.push(root);
        builder
    }

    fn push(&mut self, kind: NodeKind, span: Span, text: Option<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let parent = self.stack.last().copied();
        self.nodes.push(NodeData {
            kind,
            parent,
            children: Vec::new(),
            span,
            text,
            leaf_index: None,
            declaration: None,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0 as usize].children.push(id);
        }
        id
    }

    pub fn start_node(&mut self, kind: NodeKind) -> NodeId {
        let at = self.text.len() as u32;
        let id = self.push(kind, Span::empty(at), None);
        self.stack.push(id);
        id
    }

    pub fn token(&mut self, kind: NodeKind, text: &str) -> NodeId {
        if !self.leaves.is_empty() {
            self.text.push(' ');
        }
        let start = self.text.len() as u32;
        self.text.push_str(text);
        let span = Span {
            start,
            end: self.text.len() as u32,
        };
        let id = self.push(kind, span, Some(text.to_string()));
        self.nodes[id.0 as usize].leaf_index = Some(self.leaves.len());
        self.leaves.push(id);
        id
    }

    /// Attaches a declaration to the innermost open node.
    pub fn declare(&mut self, declaration: Declaration) {
        if let Some(open) = self.stack.last() {
            self.nodes[open.0 as usize].declaration = Some(declaration);
        }
    }

    pub fn finish_node(&mut self) {
        let Some(id) = self.stack.pop() else {
            return;
        };
        let children = &self.nodes[id.0 as usize].children;
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => {
                self.nodes[first.0 as usize]
                    .span
                    .to(self.nodes[last.0 as usize].span)
            }
            _ => Span::empty(self.text.len() as u32),
        };
        self.nodes[id.0 as usize].span = span;
    }

    pub fn finish(mut self) -> SyntaxTree {
        while !self.stack.is_empty() {
            self.finish_node();
        }
        SyntaxTree {
            nodes: self.nodes,
            leaves: self.leaves,
            text: self.text,
        }
    }
}
