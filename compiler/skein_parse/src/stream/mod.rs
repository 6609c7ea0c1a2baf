//! Lazy candidate streams.
//!
//! Applying a rule yields a [`Candidates`] stream rather than a single answer.
//! Each item is a [`RuleResult`]: either a node plus the tokens left after it,
//! or a [`RuleError`] describing where the rule got stuck. Nothing is computed
//! until the consumer asks for the next item, and dropping or cancelling the
//! stream releases every sub-stream it opened.
//!
//! # Ordering
//!
//! Successes come first, in the order the combinator defines. A stream then
//! yields at most one trailing error: the furthest failure it observed. The
//! remaining slice of an error is always the input the rule was applied to.


use std::fmt;
use std::iter::FusedIterator;

use skein_ir::{Node, Token};
use skein_stack::ensure_sufficient_stack;

use crate::RuleError;

/// One candidate produced by a rule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuleResult<'a> {
    pub outcome: Result<Node, RuleError>,
    /// Tokens left after the match, or the rule's input on failure.
    pub remaining: &'a [Token],
}

impl<'a> RuleResult<'a> {
    pub fn matched(node: Node, remaining: &'a [Token]) -> Self {
        RuleResult {
            outcome: Ok(node),
            remaining,
        }
    }

    pub fn failed(error: RuleError, input: &'a [Token]) -> Self {
        RuleResult {
            outcome: Err(error),
            remaining: input,
        }
    }

    #[inline]
    pub fn is_match(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn node(&self) -> Option<&Node> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&RuleError> {
        self.outcome.as_ref().err()
    }

    /// Attribute the node or the error to `name`.
    #[must_use]
    pub fn relabeled(self, name: &str) -> Self {
        RuleResult {
            outcome: self
                .outcome
                .map(|node| node.relabeled(name))
                .map_err(|error| error.renamed(name)),
            remaining: self.remaining,
        }
    }
}

/// A candidate producer that can report, from its state alone, that no further
/// success will come.
///
/// Sequences hold an already-matched node while they enumerate what follows it.
/// When the continuation reports `successes_exhausted`, the node is handed to
/// the last result by move instead of being copied.
pub trait CandidateStream<'a>: Iterator<Item = RuleResult<'a>> {
    /// Returns `true` when every item still to come is an error.
    ///
    /// Must not compute anything. `false` is always a safe answer.
    fn successes_exhausted(&self) -> bool;
}

/// Adapts a plain iterator: exhausted once it can yield nothing at all.
struct Plain<I>(I);

impl<'a, I: Iterator<Item = RuleResult<'a>>> Iterator for Plain<I> {
    type Item = RuleResult<'a>;

    #[inline]
    fn next(&mut self) -> Option<RuleResult<'a>> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, I: Iterator<Item = RuleResult<'a>>> CandidateStream<'a> for Plain<I> {
    fn successes_exhausted(&self) -> bool {
        self.0.size_hint().1 == Some(0)
    }
}

/// A cancellable, fused stream of [`RuleResult`]s.
pub struct Candidates<'a> {
    inner: Option<Box<dyn CandidateStream<'a> + 'a>>,
}

impl<'a> Candidates<'a> {
    pub fn new(iter: impl Iterator<Item = RuleResult<'a>> + 'a) -> Self {
        Candidates::from_stream(Plain(iter))
    }

    pub fn from_stream(stream: impl CandidateStream<'a> + 'a) -> Self {
        Candidates {
            inner: Some(Box::new(stream)),
        }
    }

    /// A stream with nothing in it.
    pub fn empty() -> Self {
        Candidates { inner: None }
    }

    /// Stop producing candidates and release everything this stream holds.
    ///
    /// Idempotent. Calling `next` afterwards returns `None`.
    pub fn cancel(&mut self) {
        if let Some(inner) = self.inner.take() {
            // Open sub-streams nest as deeply as the input.
            ensure_sufficient_stack(move || drop(inner));
        }
    }

    /// Returns `true` once the stream has ended or been cancelled.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns `true` when no further success can come out of this stream.
    pub fn successes_exhausted(&self) -> bool {
        match &self.inner {
            Some(inner) => inner.successes_exhausted(),
            None => true,
        }
    }
}

impl Drop for Candidates<'_> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<'a> Iterator for Candidates<'a> {
    type Item = RuleResult<'a>;

    fn next(&mut self) -> Option<RuleResult<'a>> {
        let inner = self.inner.as_mut()?;
        let next = ensure_sufficient_stack(|| inner.next());
        if next.is_none() {
            self.cancel();
        }
        next
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(inner) => (0, inner.size_hint().1),
            None => (0, Some(0)),
        }
    }
}

impl FusedIterator for Candidates<'_> {}

impl fmt::Debug for Candidates<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidates")
            .field("done", &self.is_done())
            .finish_non_exhaustive()
    }
}
