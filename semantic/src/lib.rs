//! Semantic collaborators for reference completion.
//!
//! Syntax tree → references → resolution and types.
//! All spans are UTF-8 byte offsets into the tree text, using `[start, end)`.

mod resolve;
mod span;
mod symbols;
pub mod syntax;
mod text_edit;
mod ty;
mod types;
mod version;

#[cfg(test)]
mod tests;

pub use resolve::{ResolvedSymbol, Resolver};
pub use span::Span;
pub use symbols::{
    ClassDef, ClassId, Modifiers, Symbol, SymbolDecl, SymbolId, SymbolKind, SymbolTable,
};
pub use syntax::{
    Declaration, NodeId, NodeKind, Reference, Segment, SyntaxTree, SyntheticError, TreeBuilder,
    build_synthetic_reference,
};
pub use text_edit::{TextEdit, apply_text_edits, rebase_offset};
pub use ty::{PrimitiveTy, Substitution, Ty};
pub use types::TypeSystem;
pub use version::DocumentVersion;
