//! Second-level candidates: `qualifier.member` for every qualifier in scope.
//!
//! For each symbol the reference could denote (unfiltered), a synthetic
//! reference `qualifier.xxx` is resolved at the cursor and its members are
//! passed through the same context filter as the direct candidates.

use super::set::CandidateSet;
use super::{CompletionEnv, CompletionRequest, LookupCandidate, adapter, items};
use crate::config::CompletionConfig;
use crate::context::ReferenceContext;
use crate::filter::CandidateFilter;
use crate::scope::{Canceled, ReadScope};
use semantic::{Reference, Substitution, Symbol, SymbolKind, Ty, build_synthetic_reference};

/// Member name used in synthetic references; resolution ignores it.
const PLACEHOLDER_MEMBER: &str = "xxx";

pub(super) fn expand(
    env: &CompletionEnv<'_>,
    scope: &ReadScope<'_>,
    request: &CompletionRequest,
    reference: &Reference,
    context: &ReferenceContext,
) -> Result<Vec<LookupCandidate>, Canceled> {
    let element_ty = request
        .expected_type
        .as_ref()
        .and_then(|expected| env.types.iterable_element_type(expected));

    let pool = items::accepted(
        env,
        scope,
        request.position,
        reference,
        &CandidateFilter::AcceptAll,
    )?;

    let mut set = CandidateSet::default();
    for qualifier in &pool {
        scope.check()?;
        let return_ty = env.types.symbol_type(qualifier.symbol);
        let Some(prefix) = qualifier_text(qualifier.symbol, return_ty.as_ref(), env.config) else {
            continue;
        };

        let template = format!("{prefix}.{PLACEHOLDER_MEMBER}");
        let synthetic = match build_synthetic_reference(env.tree, &template, request.position) {
            Ok(synthetic) => synthetic,
            Err(err) => {
                if err.is_unexpected() {
                    tracing::warn!(%err, "skipping qualifier");
                } else {
                    tracing::trace!(%err, "skipping qualifier");
                }
                continue;
            }
        };

        let members = items::accepted(env, scope, request.position, &synthetic, &context.filter)?;
        for member in &members {
            let candidate = if member.symbol.is_method() {
                LookupCandidate::qualified_method(
                    member.symbol,
                    &prefix,
                    Substitution::merged(
                        qualifier.substitution.as_ref(),
                        member.substitution.as_ref(),
                    ),
                    context.tail,
                )
            } else {
                LookupCandidate::qualified_variable(
                    member.symbol,
                    &prefix,
                    member.substitution.clone(),
                    context.tail,
                )
            };
            set.insert(candidate);
        }

        if let Some(element_ty) = &element_ty
            && let Some(candidate) = adapter::adapt(env, qualifier, &prefix, element_ty, context.tail)
        {
            set.insert(candidate);
        }
    }

    tracing::debug!(
        qualifiers = pool.len(),
        count = set.len(),
        "expanded qualified candidates"
    );
    Ok(set.into_vec())
}

/// Text that can stand before `.member`: `name()` for argument-less methods
/// returning a value, `name` for variables.
pub(super) fn qualifier_text(
    symbol: &Symbol,
    return_ty: Option<&Ty>,
    config: &CompletionConfig,
) -> Option<String> {
    match &symbol.kind {
        SymbolKind::Method { params } => {
            let return_ty = return_ty?;
            if return_ty.is_void() || return_ty.is_null() || !params.is_empty() {
                return None;
            }
            let pad = config.call_padding();
            Some(format!("{}({pad})", symbol.name))
        }
        SymbolKind::LocalVariable | SymbolKind::Parameter | SymbolKind::Field => {
            Some(symbol.name.clone())
        }
    }
}
