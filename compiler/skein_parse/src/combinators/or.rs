//! Ordered choice that keeps every success.

use skein_ir::{Node, Token};
use tracing::trace;

use crate::{CandidateStream, Candidates, FurthestError, Grammar, RuleId, RuleResult};

/// Each alternative's successes in turn, each wrapped in a one-child node
/// named after the choice.
pub(super) struct OrStream<'a> {
    grammar: &'a Grammar,
    name: &'a str,
    alternatives: &'a [RuleId],
    input: &'a [Token],
    next_alternative: usize,
    current: Option<Candidates<'a>>,
    furthest: FurthestError,
    done: bool,
}

impl<'a> OrStream<'a> {
    pub(super) fn new(
        grammar: &'a Grammar,
        name: &'a str,
        alternatives: &'a [RuleId],
        tokens: &'a [Token],
    ) -> Self {
        OrStream {
            grammar,
            name,
            alternatives,
            input: tokens,
            next_alternative: 0,
            current: None,
            furthest: FurthestError::new(),
            done: false,
        }
    }
}

impl<'a> Iterator for OrStream<'a> {
    type Item = RuleResult<'a>;

    fn next(&mut self) -> Option<RuleResult<'a>> {
        if self.done {
            return None;
        }
        loop {
            if let Some(current) = &mut self.current {
                match current.next() {
                    Some(RuleResult {
                        outcome: Ok(node),
                        remaining,
                    }) => {
                        return Some(RuleResult::matched(
                            Node::internal(self.name, vec![node]),
                            remaining,
                        ));
                    }
                    Some(RuleResult {
                        outcome: Err(error),
                        ..
                    }) => {
                        self.furthest.offer(error);
                    }
                    None => self.current = None,
                }
                continue;
            }

            if let Some(&alternative) = self.alternatives.get(self.next_alternative) {
                trace!(
                    rule = self.name,
                    alternative = self.grammar.name(alternative),
                    "trying alternative"
                );
                self.next_alternative += 1;
                self.current = Some(self.grammar.check(alternative, self.input));
                continue;
            }

            self.done = true;
            return self
                .furthest
                .take()
                .map(|error| RuleResult::failed(error, self.input));
        }
    }
}

impl<'a> CandidateStream<'a> for OrStream<'a> {
    fn successes_exhausted(&self) -> bool {
        self.done
            || (self.next_alternative == self.alternatives.len()
                && self
                    .current
                    .as_ref()
                    .is_none_or(Candidates::successes_exhausted))
    }
}
