//! Reference completion candidates and their derivation.
//!
//! Output is insertion-ordered and unranked; ranking belongs to the caller.

use crate::config::CompletionConfig;
use crate::insert::InsertCommand;
use semantic::{
    DocumentVersion, NodeId, ResolvedSymbol, Resolver, Substitution, Symbol, SymbolId, SymbolKind,
    SyntaxTree, Ty, TypeSystem,
};

mod adapter;
mod items;
mod pipeline;
mod qualifier;
mod set;

pub use crate::insert::TailPolicy;
pub use pipeline::complete;

/// Invocation count from which qualifier expansion runs ("show more").
pub const EXPANSION_INVOCATION_COUNT: u32 = 2;

/// Triggering context of one completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Leaf token at the cursor (usually the partially typed identifier).
    pub position: NodeId,
    /// UTF-8 byte offset of the cursor in the tree text.
    pub offset: u32,
    /// Type the completed expression is expected to have, if known.
    pub expected_type: Option<Ty>,
    /// 1 for a plain request, 2+ when the user asked again at the same spot.
    pub invocation_count: u32,
}

/// Collaborators for one request, all borrowed from the same snapshot.
#[derive(Clone, Copy)]
pub struct CompletionEnv<'a> {
    pub tree: &'a SyntaxTree,
    pub resolver: &'a dyn Resolver,
    pub types: &'a dyn TypeSystem,
    pub config: &'a CompletionConfig,
    version: &'a DocumentVersion,
    stamp: u64,
}

impl<'a> CompletionEnv<'a> {
    /// Captures the current document version as the version `tree` was taken at.
    pub fn new(
        tree: &'a SyntaxTree,
        resolver: &'a dyn Resolver,
        types: &'a dyn TypeSystem,
        config: &'a CompletionConfig,
        version: &'a DocumentVersion,
    ) -> Self {
        Self {
            tree,
            resolver,
            types,
            config,
            version,
            stamp: version.current(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Completion must not be offered at this position at all.
    Suppressed,
    Candidates(Vec<LookupCandidate>),
    /// The document changed during derivation; retry on a fresh snapshot.
    Canceled,
}

impl CompletionOutcome {
    pub fn candidates(&self) -> &[LookupCandidate] {
        match self {
            CompletionOutcome::Candidates(candidates) => candidates,
            CompletionOutcome::Suppressed | CompletionOutcome::Canceled => &[],
        }
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, CompletionOutcome::Suppressed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateKind {
    Variable {
        symbol: SymbolId,
        name: String,
        qualifier: Option<String>,
    },
    Method {
        symbol: SymbolId,
        name: String,
        params: usize,
        qualifier: Option<String>,
    },
    /// `Arrays.asList(qualifier)` built from an array-typed qualifier.
    Adapter { qualifier: String, call_text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CandidateTarget {
    Symbol(SymbolId),
    Expression(String),
}

/// Candidate identity: what is completed, under which qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateKey {
    pub target: CandidateTarget,
    pub qualifier: Option<String>,
}

/// One completion candidate.
///
/// `lookup` is the primary text matched against what the user typed;
/// `aliases` are further strings that should match too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupCandidate {
    pub kind: CandidateKind,
    pub lookup: String,
    pub aliases: Vec<String>,
    pub substitution: Option<Substitution>,
    pub tail: TailPolicy,
    pub custom_insert: Option<InsertCommand>,
}

impl LookupCandidate {
    pub(crate) fn for_symbol(resolved: &ResolvedSymbol<'_>, tail: TailPolicy) -> Self {
        Self::symbol_candidate(resolved.symbol, None, resolved.substitution.clone(), tail)
    }

    /// `qualifier.method`, still matching the bare method name.
    pub(crate) fn qualified_method(
        method: &Symbol,
        qualifier: &str,
        substitution: Option<Substitution>,
        tail: TailPolicy,
    ) -> Self {
        let mut candidate =
            Self::symbol_candidate(method, Some(qualifier.to_string()), substitution, tail);
        candidate.aliases.push(method.name.clone());
        candidate
    }

    /// `qualifier.field`, rendered with the prefix on insertion.
    pub(crate) fn qualified_variable(
        variable: &Symbol,
        qualifier: &str,
        substitution: Option<Substitution>,
        tail: TailPolicy,
    ) -> Self {
        Self::symbol_candidate(variable, Some(qualifier.to_string()), substitution, tail)
    }

    fn symbol_candidate(
        symbol: &Symbol,
        qualifier: Option<String>,
        substitution: Option<Substitution>,
        tail: TailPolicy,
    ) -> Self {
        let lookup = match &qualifier {
            Some(qualifier) => format!("{qualifier}.{}", symbol.name),
            None => symbol.name.clone(),
        };
        let kind = match &symbol.kind {
            SymbolKind::Method { params } => CandidateKind::Method {
                symbol: symbol.id,
                name: symbol.name.clone(),
                params: params.len(),
                qualifier,
            },
            SymbolKind::LocalVariable | SymbolKind::Parameter | SymbolKind::Field => {
                CandidateKind::Variable {
                    symbol: symbol.id,
                    name: symbol.name.clone(),
                    qualifier,
                }
            }
        };
        Self {
            kind,
            lookup,
            aliases: Vec::new(),
            substitution,
            tail,
            custom_insert: None,
        }
    }

    pub fn key(&self) -> CandidateKey {
        match &self.kind {
            CandidateKind::Variable {
                symbol, qualifier, ..
            }
            | CandidateKind::Method {
                symbol, qualifier, ..
            } => CandidateKey {
                target: CandidateTarget::Symbol(*symbol),
                qualifier: qualifier.clone(),
            },
            CandidateKind::Adapter {
                qualifier,
                call_text,
            } => CandidateKey {
                target: CandidateTarget::Expression(call_text.clone()),
                qualifier: Some(qualifier.clone()),
            },
        }
    }

    pub fn symbol(&self) -> Option<SymbolId> {
        match &self.kind {
            CandidateKind::Variable { symbol, .. } | CandidateKind::Method { symbol, .. } => {
                Some(*symbol)
            }
            CandidateKind::Adapter { .. } => None,
        }
    }

    pub fn qualifier(&self) -> Option<&str> {
        match &self.kind {
            CandidateKind::Variable { qualifier, .. } | CandidateKind::Method { qualifier, .. } => {
                qualifier.as_deref()
            }
            CandidateKind::Adapter { qualifier, .. } => Some(qualifier),
        }
    }

    /// Text the insertion renders ahead of the candidate's own text (`items().`).
    pub fn qualifier_prefix(&self) -> Option<String> {
        match &self.kind {
            CandidateKind::Variable { qualifier, .. } | CandidateKind::Method { qualifier, .. } => {
                qualifier.as_ref().map(|qualifier| format!("{qualifier}."))
            }
            CandidateKind::Adapter { .. } => None,
        }
    }

    /// `lookup` followed by the aliases.
    pub fn lookup_strings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.lookup.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// What the insertion subsystem should do when this candidate is picked.
    pub fn insert_command(&self) -> InsertCommand {
        if let Some(custom) = &self.custom_insert {
            return custom.clone();
        }
        let prefix = self.qualifier_prefix().unwrap_or_default();
        match &self.kind {
            CandidateKind::Variable { name, .. } => {
                InsertCommand::plain(format!("{prefix}{name}"), self.tail)
            }
            CandidateKind::Method { name, params, .. } => {
                let text = format!("{prefix}{name}()");
                let caret = if *params > 0 { text.len() - 1 } else { text.len() };
                InsertCommand::plain(text, self.tail).with_caret(caret as u32)
            }
            CandidateKind::Adapter { .. } => InsertCommand::plain(self.lookup.clone(), self.tail),
        }
    }

    /// Folds a duplicate (same key) into this candidate.
    pub(crate) fn absorb(&mut self, other: LookupCandidate) {
        for alias in other.lookup_strings() {
            if alias != self.lookup && !self.aliases.iter().any(|existing| existing == alias) {
                self.aliases.push(alias.to_string());
            }
        }
        self.substitution =
            Substitution::merged(self.substitution.as_ref(), other.substitution.as_ref());
        if self.custom_insert.is_none() {
            self.custom_insert = other.custom_insert;
        }
    }
}
