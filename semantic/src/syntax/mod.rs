//! Read-only syntax tree handed to completion by the parser.
//!
//! The tree is an arena of nodes addressed by [`NodeId`]. Leaves carry token
//! text; composite nodes carry children in document order. Spans are UTF-8 byte
//! offsets into [`SyntaxTree::text`], half-open `[start, end)`.

mod builder;
mod reference;
mod synthetic;

pub use builder::TreeBuilder;
pub use reference::{Reference, Segment};
pub use synthetic::{SyntheticError, build_synthetic_reference};

use crate::span::Span;
use crate::symbols::{ClassId, SymbolId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Class,
    Method,
    Parameter,
    Field,
    Block,
    LocalVariable,
    ReturnStatement,
    ThrowStatement,
    ExpressionStatement,
    ReferenceExpression,
    MethodCall,
    TypeCast,
    Assignment,
    Annotation,
    AnnotationParameterList,
    TypeElement,
    Literal,
    // Leaves.
    Identifier,
    Keyword,
    Punct,
}

impl NodeKind {
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeKind::Identifier | NodeKind::Keyword | NodeKind::Punct | NodeKind::Literal
        )
    }

    /// Declarations that introduce a variable (locals, parameters, fields).
    pub fn is_variable(self) -> bool {
        matches!(
            self,
            NodeKind::LocalVariable | NodeKind::Parameter | NodeKind::Field
        )
    }
}

/// What a declaration node introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Declaration {
    Symbol(SymbolId),
    Class(ClassId),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    span: Span,
    text: Option<String>,
    leaf_index: Option<usize>,
    declaration: Option<Declaration>,
}

#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    leaves: Vec<NodeId>,
    text: String,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn contains(&self, node: NodeId) -> bool {
        (node.0 as usize) < self.nodes.len()
    }

    fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0 as usize)
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.data(node).map(|data| data.kind)
    }

    pub fn is_kind(&self, node: NodeId, kind: NodeKind) -> bool {
        self.kind(node) == Some(kind)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.data(node).and_then(|data| data.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.data(node)
            .map(|data| data.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn span(&self, node: NodeId) -> Option<Span> {
        self.data(node).map(|data| data.span)
    }

    /// Token text of a leaf; `None` for composite nodes.
    pub fn leaf_text(&self, node: NodeId) -> Option<&str> {
        self.data(node).and_then(|data| data.text.as_deref())
    }

    /// Source text covered by `node`.
    pub fn node_text(&self, node: NodeId) -> Option<&str> {
        let span = self.span(node)?;
        self.text.get(span.start as usize..span.end as usize)
    }

    pub fn declaration(&self, node: NodeId) -> Option<Declaration> {
        self.data(node).and_then(|data| data.declaration)
    }

    pub fn declared_symbol(&self, node: NodeId) -> Option<SymbolId> {
        match self.declaration(node)? {
            Declaration::Symbol(symbol) => Some(symbol),
            Declaration::Class(_) => None,
        }
    }

    pub fn declared_class(&self, node: NodeId) -> Option<ClassId> {
        match self.declaration(node)? {
            Declaration::Class(class) => Some(class),
            Declaration::Symbol(_) => None,
        }
    }

    /// Strict ancestors of `node`, innermost first.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(node),
        }
    }

    /// Innermost strict ancestor satisfying `pred`.
    pub fn find_ancestor(
        &self,
        node: NodeId,
        mut pred: impl FnMut(NodeKind) -> bool,
    ) -> Option<NodeId> {
        self.ancestors(node)
            .find(|ancestor| self.kind(*ancestor).is_some_and(&mut pred))
    }

    fn first_leaf(&self, node: NodeId) -> Option<NodeId> {
        let mut current = node;
        loop {
            let data = self.data(current)?;
            if data.leaf_index.is_some() {
                return Some(current);
            }
            current = *data.children.first()?;
        }
    }

    /// The leaf token immediately preceding `node` in document order.
    pub fn prev_leaf(&self, node: NodeId) -> Option<NodeId> {
        let first = self.first_leaf(node)?;
        let idx = self.data(first)?.leaf_index?;
        idx.checked_sub(1).map(|prev| self.leaves[prev])
    }

    /// Leaf at a byte offset.
    ///
    /// An identifier touching the offset (including `offset == end`) wins over
    /// any other leaf, so a cursor right after a typed prefix lands on it.
    pub fn leaf_at(&self, offset: u32) -> Option<NodeId> {
        let mut fallback = None;
        for leaf in &self.leaves {
            let Some(data) = self.data(*leaf) else {
                continue;
            };
            if data.kind == NodeKind::Identifier && data.span.touches(offset) {
                return Some(*leaf);
            }
            if fallback.is_none() && data.span.start <= offset && offset < data.span.end {
                fallback = Some(*leaf);
            }
        }
        fallback
    }

    /// The reference expression whose name identifier sits at `offset`.
    pub fn reference_at(&self, offset: u32) -> Option<NodeId> {
        let leaf = self.leaf_at(offset)?;
        if !self.is_kind(leaf, NodeKind::Identifier) {
            return None;
        }
        let parent = self.parent(leaf)?;
        self.is_kind(parent, NodeKind::ReferenceExpression)
            .then_some(parent)
    }
}

pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
