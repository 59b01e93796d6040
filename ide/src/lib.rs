//! Contextual reference completion.
//!
//! Given a cursor inside a reference expression, [`complete`] classifies the
//! surrounding syntax, collects the symbols the reference could denote, and on
//! a repeated request also offers `qualifier.member` chains and array-to-list
//! adapter calls. Insertion is described by [`InsertCommand`] values and
//! performed later by [`apply_insert`] against an [`Editor`].
//!
//! Coordinates are UTF-8 byte offsets (`[start, end)`), matching `semantic`.

mod completion;
mod config;
mod context;
mod edit;
mod filter;
mod insert;
mod pattern;
mod scope;

pub use completion::{
    CandidateKey, CandidateKind, CandidateTarget, CompletionEnv, CompletionOutcome,
    CompletionRequest, EXPANSION_INVOCATION_COUNT, LookupCandidate, TailPolicy, complete,
};
pub use config::{AdapterConfig, CompletionConfig};
pub use context::{ContextRule, ReferenceContext, classify, classify_rule};
pub use edit::{BufferEditor, Editor, ShortenError};
pub use filter::{CandidateFilter, FilterEnv, SymbolClass};
pub use insert::{InsertCommand, InsertOutcome, Qualification, apply as apply_insert};
pub use pattern::{ElementPattern, element, node};
pub use scope::Canceled;

#[cfg(test)]
mod tests;
