//! Array-to-sequence adapter candidates (`Arrays.asList(values)`).

use super::{CandidateKind, CompletionEnv, LookupCandidate, TailPolicy};
use crate::config::CompletionConfig;
use crate::insert::{InsertCommand, Qualification};
use semantic::{ResolvedSymbol, Ty};

/// Adapter candidate for `qualifier` when its type is an array whose
/// component is assignable to `element_ty`.
pub(super) fn adapt(
    env: &CompletionEnv<'_>,
    qualifier: &ResolvedSymbol<'_>,
    prefix: &str,
    element_ty: &Ty,
    tail: TailPolicy,
) -> Option<LookupCandidate> {
    let declared = env.types.symbol_type(qualifier.symbol)?;
    let qualifier_ty = match &qualifier.substitution {
        Some(substitution) => substitution.apply(&declared),
        None => declared,
    };
    let component = qualifier_ty.component()?;
    if !env.types.is_assignable(element_ty, component) {
        return None;
    }
    tracing::trace!(prefix, %qualifier_ty, %element_ty, "array qualifier fits expected sequence");
    Some(adapter_candidate(env.config, prefix, tail))
}

pub(super) fn adapter_candidate(
    config: &CompletionConfig,
    prefix: &str,
    tail: TailPolicy,
) -> LookupCandidate {
    let adapter = &config.adapter;
    let pad = config.call_padding();
    let call_text = format!("{}.{}({pad}{prefix}{pad})", adapter.utility, adapter.function);
    let presentable = format!("{}.{}({prefix})", adapter.simple_name(), adapter.function);
    let short = format!("{}({prefix})", adapter.function);

    let needs_qualification = config.qualify_adapter_calls && !adapter.package_prefix().is_empty();
    let qualification = needs_qualification.then(|| Qualification {
        package_prefix: adapter.package_prefix().to_string(),
        qualified_len: adapter.utility.len() as u32,
    });
    let insert = InsertCommand {
        qualification,
        ..InsertCommand::plain(presentable.clone(), tail)
    };

    let mut aliases = Vec::new();
    for alias in [call_text.clone(), short, prefix.to_string()] {
        if alias != presentable && !aliases.contains(&alias) {
            aliases.push(alias);
        }
    }

    LookupCandidate {
        kind: CandidateKind::Adapter {
            qualifier: prefix.to_string(),
            call_text,
        },
        lookup: presentable,
        aliases,
        substitution: None,
        tail,
        custom_insert: Some(insert),
    }
}
