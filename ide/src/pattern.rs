//! Structural predicates over the syntax tree.
//!
//! A pattern is a list of conditions on one node; every condition must hold.
//! Conditions that look at other nodes (parent, previous leaf, ancestors) take
//! a nested pattern. Evaluation stops at the first failed condition.

use semantic::{NodeId, NodeKind, SyntaxTree};

#[derive(Debug, Clone, Default)]
pub struct ElementPattern {
    conditions: Vec<Condition>,
}

#[derive(Debug, Clone)]
enum Condition {
    Kind(NodeKind),
    KindMatches(fn(NodeKind) -> bool),
    Text(&'static str),
    WithParent(Box<ElementPattern>),
    AfterLeaf(Box<ElementPattern>),
    Inside(Box<ElementPattern>),
}

/// Matches any node.
pub fn element() -> ElementPattern {
    ElementPattern::default()
}

/// Matches nodes of `kind`.
pub fn node(kind: NodeKind) -> ElementPattern {
    element().of_kind(kind)
}

impl ElementPattern {
    pub fn of_kind(self, kind: NodeKind) -> Self {
        self.with(Condition::Kind(kind))
    }

    pub fn matching(self, pred: fn(NodeKind) -> bool) -> Self {
        self.with(Condition::KindMatches(pred))
    }

    /// Leaf token text equals `text`.
    pub fn with_text(self, text: &'static str) -> Self {
        self.with(Condition::Text(text))
    }

    pub fn with_parent(self, parent: ElementPattern) -> Self {
        self.with(Condition::WithParent(Box::new(parent)))
    }

    /// The leaf right before the node (in document order) matches.
    pub fn after_leaf(self, leaf: ElementPattern) -> Self {
        self.with(Condition::AfterLeaf(Box::new(leaf)))
    }

    /// Some strict ancestor matches.
    pub fn inside(self, ancestor: ElementPattern) -> Self {
        self.with(Condition::Inside(Box::new(ancestor)))
    }

    fn with(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn accepts(&self, tree: &SyntaxTree, node: NodeId) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.accepts(tree, node))
    }
}

impl Condition {
    fn accepts(&self, tree: &SyntaxTree, node: NodeId) -> bool {
        match self {
            Condition::Kind(kind) => tree.is_kind(node, *kind),
            Condition::KindMatches(pred) => tree.kind(node).is_some_and(*pred),
            Condition::Text(text) => tree.leaf_text(node) == Some(*text),
            Condition::WithParent(pattern) => tree
                .parent(node)
                .is_some_and(|parent| pattern.accepts(tree, parent)),
            Condition::AfterLeaf(pattern) => tree
                .prev_leaf(node)
                .is_some_and(|leaf| pattern.accepts(tree, leaf)),
            Condition::Inside(pattern) => tree
                .ancestors(node)
                .any(|ancestor| pattern.accepts(tree, ancestor)),
        }
    }
}
