//! Turning a candidate stream into one answer.
//!
//! The driver takes the first success and cancels everything else. If the
//! stream ends without a success, the failure that got furthest into the
//! input is the one reported.


use skein_ir::{Node, Token};
use tracing::{debug, trace};

use crate::{Candidates, FurthestError, Grammar, ParseError, RuleId};

/// Apply `root` to `tokens` with the `ignored` token types removed.
///
/// Unlike [`Grammar::parse_tokens`], nothing is required after the root: the
/// first success wins even if tokens remain.
#[tracing::instrument(level = "debug", skip_all, fields(root = grammar.name(root)))]
pub fn parse_rule(
    grammar: &Grammar,
    root: RuleId,
    ignored: &[&str],
    tokens: &[Token],
) -> Result<Node, ParseError> {
    grammar.validate()?;
    let tokens = without_ignored(tokens, |kind| ignored.iter().any(|&skip| skip == kind));
    drive(grammar.check(root, &tokens))
}

/// Take the first success from `candidates`, or the furthest failure.
pub fn drive(mut candidates: Candidates<'_>) -> Result<Node, ParseError> {
    let mut furthest = FurthestError::new();
    let mut failures = 0_usize;
    let found = candidates.by_ref().find_map(|result| match result.outcome {
        Ok(node) => Some(node),
        Err(error) => {
            failures += 1;
            if furthest.offer(error) {
                trace!(error = ?furthest.get(), "furthest failure so far");
            }
            None
        }
    });
    candidates.cancel();

    if let Some(node) = found {
        debug!(kind = %node.kind, failures, "parse succeeded");
        return Ok(node);
    }
    match furthest.into_inner() {
        Some(error) => {
            debug!(%error, rule = %error.rule, failures, "parse failed");
            Err(ParseError::Unexpected(error))
        }
        None => Err(ParseError::Exhausted),
    }
}

/// `tokens` minus those whose type `is_ignored` accepts.
pub(crate) fn without_ignored(tokens: &[Token], is_ignored: impl Fn(&str) -> bool) -> Vec<Token> {
    tokens
        .iter()
        .filter(|token| !is_ignored(&token.kind))
        .cloned()
        .collect()
}
