//! Repetition: `many` and `one_or_many`.

use skein_ir::{Node, Token};
use skein_stack::ensure_sufficient_stack;

use super::seq::{hand_out, Partial};
use super::unmatched;
use crate::{CandidateStream, Candidates, FurthestError, Grammar, RuleId, RuleResult};

/// Every repetition count of `item` starting at `tokens`, longest first.
///
/// For each success of the item, the repetitions of what it left are listed
/// before the next success is tried. The empty repetition comes last when
/// `with_empty` is set. An item success that consumes nothing ends that
/// branch instead of recursing on unchanged input.
struct Repetitions<'a> {
    grammar: &'a Grammar,
    item: RuleId,
    tokens: &'a [Token],
    with_empty: bool,
    items: Option<Candidates<'a>>,
    items_done: bool,
    rest: Option<(Option<Node>, Box<Repetitions<'a>>)>,
}

impl<'a> Repetitions<'a> {
    fn new(grammar: &'a Grammar, item: RuleId, tokens: &'a [Token], with_empty: bool) -> Self {
        Repetitions {
            grammar,
            item,
            tokens,
            with_empty,
            items: None,
            items_done: false,
            rest: None,
        }
    }

    /// No further success can come, judged without pulling anything.
    fn successes_exhausted(&self) -> bool {
        let items_exhausted = self.items_done
            || self
                .items
                .as_ref()
                .is_some_and(Candidates::successes_exhausted);
        !self.with_empty
            && items_exhausted
            && self
                .rest
                .as_ref()
                .is_none_or(|(_, rest)| rest.successes_exhausted())
    }
}

impl Drop for Repetitions<'_> {
    fn drop(&mut self) {
        // One level per repeated item.
        if let Some(rest) = self.rest.take() {
            ensure_sufficient_stack(move || drop(rest));
        }
    }
}

impl<'a> Iterator for Repetitions<'a> {
    type Item = Partial<'a>;

    fn next(&mut self) -> Option<Partial<'a>> {
        loop {
            if let Some((held, rest)) = &mut self.rest {
                match ensure_sufficient_stack(|| rest.next()) {
                    Some(Ok((mut children, remaining))) => {
                        if let Some(node) = hand_out(held, rest.successes_exhausted()) {
                            children.push(node);
                            return Some(Ok((children, remaining)));
                        }
                    }
                    Some(Err(error)) => return Some(Err(error)),
                    None => self.rest = None,
                }
                continue;
            }

            if !self.items_done {
                let (grammar, item, tokens) = (self.grammar, self.item, self.tokens);
                let items = self
                    .items
                    .get_or_insert_with(|| grammar.check(item, tokens));
                match items.next() {
                    Some(RuleResult {
                        outcome: Ok(node),
                        remaining,
                    }) => {
                        if remaining.len() == tokens.len() {
                            return Some(Ok((vec![node], remaining)));
                        }
                        let rest = Repetitions::new(grammar, item, remaining, true);
                        self.rest = Some((Some(node), Box::new(rest)));
                    }
                    Some(RuleResult {
                        outcome: Err(error),
                        ..
                    }) => return Some(Err(error)),
                    None => {
                        self.items_done = true;
                        self.items = None;
                    }
                }
                continue;
            }

            if self.with_empty {
                self.with_empty = false;
                return Some(Ok((Vec::new(), self.tokens)));
            }
            return None;
        }
    }
}

/// A `many` or `one_or_many` rule.
pub(super) struct RepeatStream<'a> {
    name: &'a str,
    input: &'a [Token],
    repetitions: Repetitions<'a>,
    at_least_one: bool,
    furthest: FurthestError,
    matched: bool,
    done: bool,
}

impl<'a> RepeatStream<'a> {
    pub(super) fn new(
        grammar: &'a Grammar,
        name: &'a str,
        item: RuleId,
        tokens: &'a [Token],
        at_least_one: bool,
    ) -> Self {
        RepeatStream {
            name,
            input: tokens,
            repetitions: Repetitions::new(grammar, item, tokens, !at_least_one),
            at_least_one,
            furthest: FurthestError::new(),
            matched: false,
            done: false,
        }
    }
}

impl<'a> Iterator for RepeatStream<'a> {
    type Item = RuleResult<'a>;

    fn next(&mut self) -> Option<RuleResult<'a>> {
        if self.done {
            return None;
        }
        loop {
            match self.repetitions.next() {
                Some(Ok((mut children, remaining))) => {
                    children.reverse();
                    self.matched = true;
                    return Some(RuleResult::matched(
                        Node::internal(self.name, children),
                        remaining,
                    ));
                }
                Some(Err(error)) => {
                    self.furthest.offer(error);
                }
                None => {
                    self.done = true;
                    let error = match self.furthest.take() {
                        Some(error) => Some(error),
                        None if self.at_least_one && !self.matched => {
                            Some(unmatched(self.name, self.input))
                        }
                        None => None,
                    };
                    return error.map(|error| RuleResult::failed(error, self.input));
                }
            }
        }
    }
}

impl<'a> CandidateStream<'a> for RepeatStream<'a> {
    fn successes_exhausted(&self) -> bool {
        self.done || self.repetitions.successes_exhausted()
    }
}
