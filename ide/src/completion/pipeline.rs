//! Completion pipeline entry point.

use super::set::CandidateSet;
use super::{
    CompletionEnv, CompletionOutcome, CompletionRequest, EXPANSION_INVOCATION_COUNT, items,
    qualifier,
};
use crate::context;
use crate::scope::{Canceled, ReadScope};
use semantic::Reference;

/// Derives completion candidates for one request.
///
/// Runs entirely against the snapshot in `env`; if the document version moves
/// while deriving, the request is abandoned with [`CompletionOutcome::Canceled`].
pub fn complete(env: &CompletionEnv<'_>, request: &CompletionRequest) -> CompletionOutcome {
    let _span = tracing::debug_span!(
        "complete",
        offset = request.offset,
        invocation_count = request.invocation_count
    )
    .entered();

    match Session::new(env, request).run() {
        Ok(outcome) => outcome,
        Err(canceled) => {
            tracing::debug!(%canceled, "completion abandoned");
            CompletionOutcome::Canceled
        }
    }
}

struct Session<'e, 'a> {
    env: &'e CompletionEnv<'a>,
    request: &'e CompletionRequest,
    scope: ReadScope<'a>,
}

impl<'e, 'a> Session<'e, 'a> {
    fn new(env: &'e CompletionEnv<'a>, request: &'e CompletionRequest) -> Self {
        Self {
            env,
            request,
            scope: ReadScope::new(env.version, env.stamp),
        }
    }

    fn run(self) -> Result<CompletionOutcome, Canceled> {
        self.scope.check()?;
        let tree = self.env.tree;

        // 1) Find the reference being completed.
        let Some(reference) = tree
            .reference_at(self.request.offset)
            .and_then(|node| Reference::from_node(tree, node))
        else {
            tracing::debug!("no reference at cursor");
            return Ok(CompletionOutcome::Candidates(Vec::new()));
        };

        // 2) Classify the position; no context means no completion here.
        let Some(context) = context::classify(tree, self.request.position) else {
            return Ok(CompletionOutcome::Suppressed);
        };

        // 3) Direct candidates.
        let mut set = CandidateSet::default();
        set.extend(items::generate(
            self.env,
            &self.scope,
            self.request.position,
            &reference,
            &context.filter,
            context.tail,
        )?);

        // 4) Qualified and adapter candidates on a repeated request.
        if self.request.invocation_count >= EXPANSION_INVOCATION_COUNT {
            set.extend(qualifier::expand(
                self.env,
                &self.scope,
                self.request,
                &reference,
                &context,
            )?);
        }

        self.scope.check()?;
        Ok(CompletionOutcome::Candidates(set.into_vec()))
    }
}
