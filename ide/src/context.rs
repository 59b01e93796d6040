//! Classifies the syntax around the cursor into a filter and a tail policy.
//!
//! Rules are tried in [`ContextRule::ORDERED`] order and the first match wins.

use crate::completion::TailPolicy;
use crate::filter::{CandidateFilter, SymbolClass};
use crate::pattern::{ElementPattern, element, node};
use semantic::{Modifiers, NodeId, NodeKind, SyntaxTree};
use std::sync::LazyLock;

/// `throw <caret>`
static THROW_OPERAND: LazyLock<ElementPattern> = LazyLock::new(|| {
    element().with_parent(
        node(NodeKind::ReferenceExpression).with_parent(node(NodeKind::ThrowStatement)),
    )
});

/// `(Type) <caret>`
static CAST_OPERAND: LazyLock<ElementPattern> = LazyLock::new(|| {
    element().after_leaf(
        node(NodeKind::Punct)
            .with_text(")")
            .with_parent(node(NodeKind::TypeCast)),
    )
});

/// `return <caret>`
static RETURN_VALUE: LazyLock<ElementPattern> = LazyLock::new(|| {
    element()
        .after_leaf(node(NodeKind::Keyword).with_text("return"))
        .inside(node(NodeKind::ReturnStatement))
});

/// `@Anno(<caret>)`
static ANNOTATION_ARGUMENT: LazyLock<ElementPattern> =
    LazyLock::new(|| element().inside(node(NodeKind::AnnotationParameterList)));

/// `int x = <caret>`, field and parameter declarations alike.
static VARIABLE_INITIALIZER: LazyLock<ElementPattern> =
    LazyLock::new(|| element().inside(element().matching(NodeKind::is_variable)));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextRule {
    ThrowOperand,
    CastOperand,
    ReturnValue,
    AnnotationArgument,
    VariableInitializer,
    Default,
}

/// Filter and tail policy for every candidate of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceContext {
    pub rule: ContextRule,
    pub filter: CandidateFilter,
    pub tail: TailPolicy,
}

impl ContextRule {
    pub const ORDERED: [ContextRule; 6] = [
        ContextRule::ThrowOperand,
        ContextRule::CastOperand,
        ContextRule::ReturnValue,
        ContextRule::AnnotationArgument,
        ContextRule::VariableInitializer,
        ContextRule::Default,
    ];

    /// The pattern that selects this rule; `Default` has none.
    pub fn pattern(self) -> Option<&'static ElementPattern> {
        match self {
            ContextRule::ThrowOperand => Some(&*THROW_OPERAND),
            ContextRule::CastOperand => Some(&*CAST_OPERAND),
            ContextRule::ReturnValue => Some(&*RETURN_VALUE),
            ContextRule::AnnotationArgument => Some(&*ANNOTATION_ARGUMENT),
            ContextRule::VariableInitializer => Some(&*VARIABLE_INITIALIZER),
            ContextRule::Default => None,
        }
    }

    /// Builds a fresh context for this rule; `None` suppresses completion.
    pub fn context(self) -> Option<ReferenceContext> {
        let (filter, tail) = match self {
            ContextRule::ThrowOperand => (CandidateFilter::AcceptAll, TailPolicy::Semicolon),
            ContextRule::CastOperand => return None,
            ContextRule::ReturnValue => (
                CandidateFilter::ExcludeDeclared(SymbolClass::Method),
                TailPolicy::UnknownDefer,
            ),
            ContextRule::AnnotationArgument => (
                CandidateFilter::and([
                    CandidateFilter::Class(SymbolClass::Field),
                    CandidateFilter::Modifiers(Modifiers::STATIC | Modifiers::FINAL),
                ]),
                TailPolicy::None,
            ),
            ContextRule::VariableInitializer => (
                CandidateFilter::and([
                    CandidateFilter::ExcludeDeclared(SymbolClass::Variable),
                    CandidateFilter::ExcludeSillyAssignment,
                ]),
                TailPolicy::None,
            ),
            ContextRule::Default => (CandidateFilter::ExcludeSillyAssignment, TailPolicy::None),
        };
        Some(ReferenceContext {
            rule: self,
            filter,
            tail,
        })
    }
}

/// First rule whose pattern accepts `position`.
pub fn classify_rule(tree: &SyntaxTree, position: NodeId) -> ContextRule {
    ContextRule::ORDERED
        .into_iter()
        .find(|rule| {
            rule.pattern()
                .is_none_or(|pattern| pattern.accepts(tree, position))
        })
        .unwrap_or(ContextRule::Default)
}

/// Classifies the cursor position.
///
/// `None` means completion is suppressed here, which callers must keep apart
/// from a context that merely yields no candidates.
pub fn classify(tree: &SyntaxTree, position: NodeId) -> Option<ReferenceContext> {
    let rule = classify_rule(tree, position);
    tracing::debug!(?rule, "classified completion position");
    rule.context()
}
