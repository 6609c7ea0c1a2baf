//! `one_or_none`.

use skein_ir::{Node, Token};

use crate::{CandidateStream, Candidates, FurthestError, Grammar, RuleId, RuleResult};

/// The item's successes wrapped in a one-child node, then the skipped
/// candidate: an empty node that consumes nothing.
pub(super) struct OptionalStream<'a> {
    grammar: &'a Grammar,
    name: &'a str,
    item: RuleId,
    input: &'a [Token],
    items: Option<Candidates<'a>>,
    items_done: bool,
    skipped: bool,
    furthest: FurthestError,
}

impl<'a> OptionalStream<'a> {
    pub(super) fn new(
        grammar: &'a Grammar,
        name: &'a str,
        item: RuleId,
        tokens: &'a [Token],
    ) -> Self {
        OptionalStream {
            grammar,
            name,
            item,
            input: tokens,
            items: None,
            items_done: false,
            skipped: false,
            furthest: FurthestError::new(),
        }
    }
}

impl<'a> Iterator for OptionalStream<'a> {
    type Item = RuleResult<'a>;

    fn next(&mut self) -> Option<RuleResult<'a>> {
        while !self.items_done {
            let (grammar, item, input) = (self.grammar, self.item, self.input);
            let items = self
                .items
                .get_or_insert_with(|| grammar.check(item, input));
            match items.next() {
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
                None => {
                    self.items_done = true;
                    self.items = None;
                }
            }
        }

        if !self.skipped {
            self.skipped = true;
            return Some(RuleResult::matched(
                Node::internal(self.name, Vec::new()),
                self.input,
            ));
        }

        self.furthest
            .take()
            .map(|error| RuleResult::failed(error, self.input))
    }
}

impl<'a> CandidateStream<'a> for OptionalStream<'a> {
    fn successes_exhausted(&self) -> bool {
        self.skipped
    }
}
