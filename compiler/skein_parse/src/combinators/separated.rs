//! Separated lists: `item (separator item)*`.

use skein_ir::{Node, Token};

use super::seq::hand_out;
use super::unmatched;
use crate::{CandidateStream, Candidates, FurthestError, Grammar, RuleId, RuleResult};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Phase {
    Items,
    Empty,
    Diagnostic,
    Done,
}

/// A separated list as one flat node: `item, sep, item, sep, item, ...`.
///
/// Candidates follow the first item's successes; for each, every match of the
/// hidden tail is listed, longest first. The empty list comes last unless at
/// least one item is required.
pub(super) struct SeparatedStream<'a> {
    grammar: &'a Grammar,
    name: &'a str,
    item: RuleId,
    tail: RuleId,
    input: &'a [Token],
    at_least_one: bool,
    phase: Phase,
    items: Option<Candidates<'a>>,
    tails: Option<(Option<Node>, Candidates<'a>)>,
    furthest: FurthestError,
    matched: bool,
}

impl<'a> SeparatedStream<'a> {
    pub(super) fn new(
        grammar: &'a Grammar,
        name: &'a str,
        item: RuleId,
        tail: RuleId,
        tokens: &'a [Token],
        at_least_one: bool,
    ) -> Self {
        SeparatedStream {
            grammar,
            name,
            item,
            tail,
            input: tokens,
            at_least_one,
            phase: Phase::Items,
            items: None,
            tails: None,
            furthest: FurthestError::new(),
            matched: false,
        }
    }

    fn next_item(&mut self) -> Option<RuleResult<'a>> {
        loop {
            if let Some((first, tails)) = &mut self.tails {
                match tails.next() {
                    Some(RuleResult {
                        outcome: Ok(tail),
                        remaining,
                    }) => {
                        let Some(first) = hand_out(first, tails.successes_exhausted()) else {
                            continue;
                        };
                        // Tail items are `Seq(separator, item)`; splice their children in.
                        let mut children = vec![first];
                        for tail_item in tail.into_children() {
                            children.extend(tail_item.into_children());
                        }
                        self.matched = true;
                        return Some(RuleResult::matched(
                            Node::internal(self.name, children),
                            remaining,
                        ));
                    }
                    Some(RuleResult {
                        outcome: Err(error),
                        ..
                    }) => {
                        self.furthest.offer(error);
                    }
                    None => self.tails = None,
                }
                continue;
            }

            let (grammar, item, input) = (self.grammar, self.item, self.input);
            let items = self
                .items
                .get_or_insert_with(|| grammar.check(item, input));
            match items.next() {
                Some(RuleResult {
                    outcome: Ok(first),
                    remaining,
                }) => {
                    self.tails = Some((Some(first), grammar.check(self.tail, remaining)));
                }
                Some(RuleResult {
                    outcome: Err(error),
                    ..
                }) => {
                    self.furthest.offer(error);
                }
                None => {
                    self.items = None;
                    return None;
                }
            }
        }
    }
}

impl<'a> Iterator for SeparatedStream<'a> {
    type Item = RuleResult<'a>;

    fn next(&mut self) -> Option<RuleResult<'a>> {
        loop {
            match self.phase {
                Phase::Items => match self.next_item() {
                    Some(result) => return Some(result),
                    None => self.phase = Phase::Empty,
                },
                Phase::Empty => {
                    self.phase = Phase::Diagnostic;
                    if !self.at_least_one {
                        return Some(RuleResult::matched(
                            Node::internal(self.name, Vec::new()),
                            self.input,
                        ));
                    }
                }
                Phase::Diagnostic => {
                    self.phase = Phase::Done;
                    let error = match self.furthest.take() {
                        Some(error) => Some(error),
                        None if self.at_least_one && !self.matched => {
                            Some(unmatched(self.name, self.input))
                        }
                        None => None,
                    };
                    return error.map(|error| RuleResult::failed(error, self.input));
                }
                Phase::Done => return None,
            }
        }
    }
}

impl<'a> CandidateStream<'a> for SeparatedStream<'a> {
    fn successes_exhausted(&self) -> bool {
        match self.phase {
            Phase::Items => false,
            Phase::Empty => self.at_least_one,
            Phase::Diagnostic | Phase::Done => true,
        }
    }
}
