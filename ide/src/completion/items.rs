//! Direct candidates: resolver output that passes the context filter.

use super::set::CandidateSet;
use super::{CompletionEnv, LookupCandidate, TailPolicy};
use crate::filter::{CandidateFilter, FilterEnv};
use crate::scope::{Canceled, ReadScope};
use semantic::{NodeId, Reference, ResolvedSymbol};

/// Resolves `reference` and keeps the symbols `filter` accepts, in resolver order.
pub(super) fn accepted<'a>(
    env: &CompletionEnv<'a>,
    scope: &ReadScope<'_>,
    position: NodeId,
    reference: &Reference,
    filter: &CandidateFilter,
) -> Result<Vec<ResolvedSymbol<'a>>, Canceled> {
    scope.check()?;
    let filter_env = FilterEnv::new(env.tree, position, env.resolver);
    let resolved = env.resolver.resolve(env.tree, reference);
    scope.check()?;

    let accepted = resolved
        .into_iter()
        .filter(|resolved| {
            let keep = filter.accepts(resolved.symbol, &filter_env);
            if !keep {
                tracing::trace!(symbol = %resolved.symbol, "rejected by context filter");
            }
            keep
        })
        .collect();
    // Filters may resolve again (assignment targets).
    scope.check()?;
    Ok(accepted)
}

/// Primary generation: one candidate per accepted symbol, all with `tail`.
///
/// An unresolvable reference simply produces nothing.
pub(super) fn generate(
    env: &CompletionEnv<'_>,
    scope: &ReadScope<'_>,
    position: NodeId,
    reference: &Reference,
    filter: &CandidateFilter,
    tail: TailPolicy,
) -> Result<Vec<LookupCandidate>, Canceled> {
    let set: CandidateSet = accepted(env, scope, position, reference, filter)?
        .iter()
        .map(|resolved| LookupCandidate::for_symbol(resolved, tail))
        .collect();
    tracing::debug!(reference = %reference, count = set.len(), "generated direct candidates");
    Ok(set.into_vec())
}
