//! Single-token rules.

use std::iter;

use skein_ir::{Node, Token};

use crate::{Candidates, RuleError, RuleResult};

/// Match the first token by type, and by exact text when `text` is given.
///
/// Always exactly one candidate. Running out of input fails on the
/// end-of-stream token.
pub(super) fn check<'a>(
    name: &'a str,
    kind: &'a str,
    text: Option<&'a str>,
    tokens: &'a [Token],
) -> Candidates<'a> {
    Candidates::new(iter::once_with(move || match tokens.split_first() {
        Some((head, rest)) if accepts(head, kind, text) => {
            RuleResult::matched(Node::leaf(name, head.clone()), rest)
        }
        Some((head, _)) => RuleResult::failed(RuleError::new(name, head.clone()), tokens),
        None => RuleResult::failed(RuleError::new(name, Token::end_of_stream()), tokens),
    }))
}

fn accepts(token: &Token, kind: &str, text: Option<&str>) -> bool {
    token.is_kind(kind)
        && match text {
            Some(text) => token.text == text,
            None => true,
        }
}
