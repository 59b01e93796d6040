//! Name resolution: which symbols a reference could denote.

use crate::symbols::{Symbol, SymbolId, SymbolTable};
use crate::syntax::{NodeId, NodeKind, Reference, Segment, SyntaxTree};
use crate::ty::{Substitution, Ty};
use std::collections::HashSet;

/// A symbol a reference may denote, plus the substitution it is seen through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSymbol<'s> {
    pub symbol: &'s Symbol,
    pub substitution: Option<Substitution>,
}

/// Name-resolution collaborator consumed by the completion core.
///
/// Returns every symbol the reference could denote at its position (the
/// completion variants), in scope order. An unresolvable reference yields an
/// empty list.
pub trait Resolver {
    fn resolve<'s>(&'s self, tree: &SyntaxTree, reference: &Reference) -> Vec<ResolvedSymbol<'s>>;
}

impl Resolver for SymbolTable {
    fn resolve<'s>(&'s self, tree: &SyntaxTree, reference: &Reference) -> Vec<ResolvedSymbol<'s>> {
        if !reference.is_qualified() {
            return self.visible_symbols(tree, reference.anchor);
        }
        let Some(qualifier_ty) = self.qualifier_type(tree, reference.anchor, &reference.qualifier)
        else {
            tracing::trace!(reference = %reference, "qualifier has no type");
            return Vec::new();
        };
        let mut collector = Collector::default();
        for (symbol, substitution) in self.class_members(&qualifier_ty) {
            collector.push(symbol, substitution);
        }
        collector.out
    }
}

#[derive(Default)]
struct Collector<'s> {
    out: Vec<ResolvedSymbol<'s>>,
    variable_names: HashSet<&'s str>,
    method_signatures: HashSet<(&'s str, usize)>,
    ids: HashSet<SymbolId>,
}

impl<'s> Collector<'s> {
    /// Inner declarations shadow outer variables of the same name; overriding
    /// methods hide the overridden signature.
    fn push(&mut self, symbol: &'s Symbol, substitution: Substitution) {
        if !self.ids.insert(symbol.id) {
            return;
        }
        let fresh = if symbol.is_method() {
            self.method_signatures
                .insert((symbol.name.as_str(), symbol.param_count()))
        } else {
            self.variable_names.insert(symbol.name.as_str())
        };
        if fresh {
            self.out.push(ResolvedSymbol {
                symbol,
                substitution: (!substitution.is_empty()).then_some(substitution),
            });
        }
    }
}

impl SymbolTable {
    /// Symbols visible from `anchor`, innermost scope first.
    ///
    /// Locals count only when declared at or before the anchor.
    fn visible_symbols<'s>(&'s self, tree: &SyntaxTree, anchor: NodeId) -> Vec<ResolvedSymbol<'s>> {
        let anchor_start = tree.span(anchor).map(|span| span.start).unwrap_or(0);
        let mut collector = Collector::default();

        for scope in tree.ancestors(anchor) {
            match tree.kind(scope) {
                Some(NodeKind::Block) => {
                    for child in tree.children(scope) {
                        let declared_before = tree
                            .span(*child)
                            .is_some_and(|span| span.start <= anchor_start);
                        if !(tree.is_kind(*child, NodeKind::LocalVariable) && declared_before) {
                            continue;
                        }
                        if let Some(symbol) = tree
                            .declared_symbol(*child)
                            .and_then(|id| self.symbol(id))
                        {
                            collector.push(symbol, Substitution::new());
                        }
                    }
                }
                Some(NodeKind::Method) => {
                    let params = tree
                        .children(scope)
                        .iter()
                        .filter(|child| tree.is_kind(**child, NodeKind::Parameter))
                        .filter_map(|child| tree.declared_symbol(*child))
                        .filter_map(|id| self.symbol(id));
                    for symbol in params {
                        collector.push(symbol, Substitution::new());
                    }
                }
                Some(NodeKind::Class) => {
                    let Some(class) = tree.declared_class(scope).and_then(|id| self.class(id)) else {
                        continue;
                    };
                    for (symbol, substitution) in self.class_members(&Ty::class(class.name.clone())) {
                        collector.push(symbol, substitution);
                    }
                }
                _ => {}
            }
        }

        collector.out
    }

    /// Members of a class type and its supertypes, each with the substitution
    /// that maps its declaring class's parameters.
    fn class_members(&self, ty: &Ty) -> Vec<(&Symbol, Substitution)> {
        let mut out = Vec::new();
        let mut visited = Vec::new();
        self.class_members_inner(ty, &mut out, &mut visited);
        out
    }

    fn class_members_inner<'s>(
        &'s self,
        ty: &Ty,
        out: &mut Vec<(&'s Symbol, Substitution)>,
        visited: &mut Vec<String>,
    ) {
        let Ty::Class { name, args } = ty else {
            return;
        };
        if visited.iter().any(|seen| seen == name) {
            return;
        }
        visited.push(name.clone());
        let Some(def) = self.class_named(name) else {
            return;
        };

        let substitution = Substitution::from_params(&def.type_params, args);
        for member in self.members(def.id) {
            out.push((member, substitution.clone()));
        }
        for supertype in &def.supertypes {
            self.class_members_inner(&substitution.apply(supertype), out, visited);
        }
    }

    fn qualifier_type(&self, tree: &SyntaxTree, anchor: NodeId, segments: &[Segment]) -> Option<Ty> {
        let (first, rest) = segments.split_first()?;
        let visible = self.visible_symbols(tree, anchor);
        let mut ty = segment_type(
            first,
            visible
                .iter()
                .map(|resolved| (resolved.symbol, resolved.substitution.clone().unwrap_or_default())),
        )?;
        for segment in rest {
            ty = segment_type(segment, self.class_members(&ty).into_iter())?;
        }
        Some(ty)
    }
}

fn segment_type<'s>(
    segment: &Segment,
    mut candidates: impl Iterator<Item = (&'s Symbol, Substitution)>,
) -> Option<Ty> {
    let (symbol, substitution) = candidates.find(|(symbol, _)| match segment {
        Segment::Name(name) => symbol.is_variable() && symbol.name == *name,
        Segment::Call(name) => {
            symbol.is_method() && symbol.param_count() == 0 && symbol.name == *name
        }
    })?;
    let ty = substitution.apply(&symbol.ty);
    (!ty.is_void()).then_some(ty)
}
