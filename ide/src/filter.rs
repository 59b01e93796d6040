//! Accept/reject predicates over resolved symbols.

use semantic::{Modifiers, NodeId, NodeKind, Reference, Resolver, Symbol, SymbolId, SyntaxTree};
use std::cell::OnceCell;

/// Broad class of a symbol or declaration node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolClass {
    /// Locals, parameters and fields.
    Variable,
    Field,
    Method,
}

impl SymbolClass {
    fn matches_symbol(self, symbol: &Symbol) -> bool {
        match self {
            SymbolClass::Variable => symbol.is_variable(),
            SymbolClass::Field => symbol.is_field(),
            SymbolClass::Method => symbol.is_method(),
        }
    }

    fn matches_node(self, kind: NodeKind) -> bool {
        match self {
            SymbolClass::Variable => kind.is_variable(),
            SymbolClass::Field => kind == NodeKind::Field,
            SymbolClass::Method => kind == NodeKind::Method,
        }
    }
}

/// Predicate deciding which resolved symbols become candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateFilter {
    AcceptAll,
    Class(SymbolClass),
    /// The symbol carries all of these modifiers.
    Modifiers(Modifiers),
    /// Rejects the declaration of this class that encloses the position
    /// (the variable being initialized, the method being returned from).
    ExcludeDeclared(SymbolClass),
    /// Rejects `x` when the position is the right-hand side of `x = ...`.
    ExcludeSillyAssignment,
    And(Vec<CandidateFilter>),
    Not(Box<CandidateFilter>),
}

impl CandidateFilter {
    pub fn and(filters: impl IntoIterator<Item = CandidateFilter>) -> Self {
        CandidateFilter::And(filters.into_iter().collect())
    }

    pub fn negate(filter: CandidateFilter) -> Self {
        CandidateFilter::Not(Box::new(filter))
    }

    pub fn accepts(&self, symbol: &Symbol, env: &FilterEnv<'_>) -> bool {
        match self {
            CandidateFilter::AcceptAll => true,
            CandidateFilter::Class(class) => class.matches_symbol(symbol),
            CandidateFilter::Modifiers(required) => symbol.has_modifiers(*required),
            CandidateFilter::ExcludeDeclared(class) => env.enclosing_declaration(*class) != Some(symbol.id),
            CandidateFilter::ExcludeSillyAssignment => !env.assignment_targets().contains(&symbol.id),
            CandidateFilter::And(filters) => filters.iter().all(|filter| filter.accepts(symbol, env)),
            CandidateFilter::Not(filter) => !filter.accepts(symbol, env),
        }
    }
}

/// Position-dependent facts a filter may need, computed lazily once per request.
pub struct FilterEnv<'a> {
    tree: &'a SyntaxTree,
    position: NodeId,
    resolver: &'a dyn Resolver,
    assignment_targets: OnceCell<Vec<SymbolId>>,
}

impl<'a> FilterEnv<'a> {
    pub fn new(tree: &'a SyntaxTree, position: NodeId, resolver: &'a dyn Resolver) -> Self {
        Self {
            tree,
            position,
            resolver,
            assignment_targets: OnceCell::new(),
        }
    }

    fn enclosing_declaration(&self, class: SymbolClass) -> Option<SymbolId> {
        let declaration = self
            .tree
            .find_ancestor(self.position, |kind| class.matches_node(kind))?;
        self.tree.declared_symbol(declaration)
    }

    /// Symbols the left-hand side denotes when the position is the
    /// right-hand operand of an assignment.
    fn assignment_targets(&self) -> &[SymbolId] {
        self.assignment_targets
            .get_or_init(|| self.compute_assignment_targets())
    }

    fn compute_assignment_targets(&self) -> Vec<SymbolId> {
        let tree = self.tree;
        let Some(rhs) = tree
            .parent(self.position)
            .filter(|parent| tree.is_kind(*parent, NodeKind::ReferenceExpression))
        else {
            return Vec::new();
        };
        let Some(assignment) = tree
            .parent(rhs)
            .filter(|parent| tree.is_kind(*parent, NodeKind::Assignment))
        else {
            return Vec::new();
        };
        let children = tree.children(assignment);
        if children.last() != Some(&rhs) {
            return Vec::new();
        }
        let Some(lhs) = children
            .first()
            .and_then(|lhs| Reference::from_node(tree, *lhs))
        else {
            return Vec::new();
        };

        self.resolver
            .resolve(tree, &lhs)
            .into_iter()
            .filter(|resolved| resolved.symbol.is_variable() && resolved.symbol.name == lhs.name)
            .map(|resolved| resolved.symbol.id)
            .collect()
    }
}
