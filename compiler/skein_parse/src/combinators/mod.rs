//! The rule combinators.
//!
//! Each combinator is a small state machine implementing `Iterator`. It owns
//! the sub-streams it has opened and opens the next one only when asked for
//! another candidate, so the search is depth-first and strictly on demand.
//!
//! | Rule | Successes, in order |
//! |------|---------------------|
//! | token | the single token, if it matches |
//! | seq | every combination, earlier rules varying slowest |
//! | or | each alternative's successes, alternative by alternative |
//! | many / one-or-many | longest first, the empty repetition last |
//! | one-or-none | the rule's successes, then the skipped candidate |
//! | separated | like many over `item (separator item)*` |
//!
//! After its successes, every stream yields the furthest failure it saw, if
//! any. Repetition stops extending a match once an item consumes nothing.

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

mod optional;
mod or;
mod repeat;
mod separated;
mod seq;
mod token;

pub(crate) use seq::SeqStream;

use skein_ir::Token;

use crate::rule::RuleKind;
use crate::{CandidateStream, Candidates, Grammar, RuleError, RuleId, RuleResult};

/// Apply rule `id` of `grammar` to `tokens`.
pub(crate) fn check<'a>(grammar: &'a Grammar, id: RuleId, tokens: &'a [Token]) -> Candidates<'a> {
    let rule = grammar.get(id);
    let name = rule.name.as_str();
    match &rule.kind {
        RuleKind::Token { kind, text } => token::check(name, kind, text.as_deref(), tokens),
        RuleKind::Seq(rules) => {
            Candidates::from_stream(SeqStream::new(grammar, name, rules, tokens))
        }
        RuleKind::Or(alternatives) => {
            Candidates::from_stream(or::OrStream::new(grammar, name, alternatives, tokens))
        }
        RuleKind::Many(item) => {
            let repeat = repeat::RepeatStream::new(grammar, name, *item, tokens, false);
            Candidates::from_stream(repeat)
        }
        RuleKind::OneOrMany(item) => {
            let repeat = repeat::RepeatStream::new(grammar, name, *item, tokens, true);
            Candidates::from_stream(repeat)
        }
        RuleKind::OneOrNone(item) => {
            Candidates::from_stream(optional::OptionalStream::new(grammar, name, *item, tokens))
        }
        RuleKind::Separated {
            item,
            tail,
            at_least_one,
        } => Candidates::from_stream(separated::SeparatedStream::new(
            grammar,
            name,
            *item,
            *tail,
            tokens,
            *at_least_one,
        )),
        RuleKind::Rename(inner) => Candidates::from_stream(RenameStream {
            name,
            inner: grammar.check(*inner, tokens),
        }),
        RuleKind::Forward(Some(target)) => grammar.check(*target, tokens),
        RuleKind::Forward(None) => Candidates::empty(),
    }
}

/// Another rule's candidates attributed to a new name.
struct RenameStream<'a> {
    name: &'a str,
    inner: Candidates<'a>,
}

impl<'a> Iterator for RenameStream<'a> {
    type Item = RuleResult<'a>;

    fn next(&mut self) -> Option<RuleResult<'a>> {
        let name = self.name;
        self.inner.next().map(|result| result.relabeled(name))
    }
}

impl<'a> CandidateStream<'a> for RenameStream<'a> {
    fn successes_exhausted(&self) -> bool {
        self.inner.successes_exhausted()
    }
}

/// The error reported by a rule that must match but never did and saw no
/// deeper failure: it blames the first token it was given.
fn unmatched(name: &str, tokens: &[Token]) -> RuleError {
    let token = tokens.first().cloned().unwrap_or_else(Token::end_of_stream);
    RuleError::new(name, token)
}
