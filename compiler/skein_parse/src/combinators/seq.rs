//! Sequences.

use skein_ir::{Node, Token};
use skein_stack::ensure_sufficient_stack;

use crate::{
    CandidateStream, Candidates, FurthestError, Grammar, RuleError, RuleId, RuleResult,
};

/// Children matched so far and the tokens after them, or a sub-rule failure.
///
/// Children are stored last first, so that each level pushes its own node in
/// constant time. The stream that builds the final node reverses them once.
pub(super) type Partial<'a> = Result<(Vec<Node>, &'a [Token]), RuleError>;

/// The held node for one more result built on it.
///
/// Copied while further results may still need it; the `last` one takes it.
pub(super) fn hand_out(held: &mut Option<Node>, last: bool) -> Option<Node> {
    if last {
        held.take()
    } else {
        held.clone()
    }
}

/// Every way of matching `rules` back to back.
///
/// For each success of the first rule, the remaining rules are matched
/// against what it left; earlier rules vary slowest. Sub-rule failures are
/// passed through as they occur.
struct Chain<'a> {
    grammar: &'a Grammar,
    rules: &'a [RuleId],
    tokens: &'a [Token],
    started: bool,
    head: Option<Candidates<'a>>,
    tail: Option<(Option<Node>, Box<Chain<'a>>)>,
}

impl<'a> Chain<'a> {
    fn new(grammar: &'a Grammar, rules: &'a [RuleId], tokens: &'a [Token]) -> Self {
        Chain {
            grammar,
            rules,
            tokens,
            started: false,
            head: None,
            tail: None,
        }
    }

    /// No further success can come, judged without pulling anything.
    fn successes_exhausted(&self) -> bool {
        if self.rules.is_empty() {
            return self.started;
        }
        self.started
            && self
                .tail
                .as_ref()
                .is_none_or(|(_, tail)| tail.successes_exhausted())
            && self
                .head
                .as_ref()
                .is_none_or(Candidates::successes_exhausted)
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = Partial<'a>;

    fn next(&mut self) -> Option<Partial<'a>> {
        let rules = self.rules;
        let Some((&first, rest)) = rules.split_first() else {
            // Nothing left to match: one empty success.
            if self.started {
                return None;
            }
            self.started = true;
            return Some(Ok((Vec::new(), self.tokens)));
        };

        loop {
            if let Some((held, tail)) = &mut self.tail {
                match ensure_sufficient_stack(|| tail.next()) {
                    Some(Ok((mut children, remaining))) => {
                        if let Some(node) = hand_out(held, tail.successes_exhausted()) {
                            children.push(node);
                            return Some(Ok((children, remaining)));
                        }
                    }
                    Some(Err(error)) => return Some(Err(error)),
                    None => self.tail = None,
                }
                continue;
            }

            if !self.started {
                self.started = true;
                self.head = Some(self.grammar.check(first, self.tokens));
            }
            let head = self.head.as_mut()?;
            match head.next() {
                Some(RuleResult {
                    outcome: Ok(node),
                    remaining,
                }) => {
                    let tail = Chain::new(self.grammar, rest, remaining);
                    self.tail = Some((Some(node), Box::new(tail)));
                }
                Some(RuleResult {
                    outcome: Err(error),
                    ..
                }) => return Some(Err(error)),
                None => {
                    self.head = None;
                    return None;
                }
            }
        }
    }
}

/// A sequence rule: every combination of its rules' matches as one node.
pub(crate) struct SeqStream<'a> {
    name: &'a str,
    input: &'a [Token],
    chain: Chain<'a>,
    furthest: FurthestError,
    done: bool,
}

impl<'a> SeqStream<'a> {
    pub(crate) fn new(
        grammar: &'a Grammar,
        name: &'a str,
        rules: &'a [RuleId],
        tokens: &'a [Token],
    ) -> Self {
        SeqStream {
            name,
            input: tokens,
            chain: Chain::new(grammar, rules, tokens),
            furthest: FurthestError::new(),
            done: false,
        }
    }
}

impl<'a> Iterator for SeqStream<'a> {
    type Item = RuleResult<'a>;

    fn next(&mut self) -> Option<RuleResult<'a>> {
        if self.done {
            return None;
        }
        loop {
            match self.chain.next() {
                Some(Ok((mut children, remaining))) => {
                    children.reverse();
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
                    return self
                        .furthest
                        .take()
                        .map(|error| RuleResult::failed(error, self.input));
                }
            }
        }
    }
}

impl<'a> CandidateStream<'a> for SeqStream<'a> {
    fn successes_exhausted(&self) -> bool {
        self.done || self.chain.successes_exhausted()
    }
}
