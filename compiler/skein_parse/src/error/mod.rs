//! Rule failures and the errors surfaced by the driver.
//!
//! A [`RuleError`] is a value inside a candidate stream, not a control-flow
//! event: a rule reports "this is where I could not continue" and keeps
//! producing candidates. [`FurthestError`] is the one place that decides which
//! of many such reports is worth showing to a user.


use skein_ir::Token;
use skein_lexer::LexError;
use thiserror::Error;

/// A rule could not match at `token`.
///
/// `rule` names the rule that rejected the token. When input runs out, the
/// token is [`Token::end_of_stream`].
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error(
    "Unexpected token {:?} at line {}, column {}",
    .token.text,
    .token.line,
    .token.column
)]
pub struct RuleError {
    pub rule: String,
    pub token: Token,
}

impl RuleError {
    pub fn new(rule: impl Into<String>, token: Token) -> Self {
        RuleError {
            rule: rule.into(),
            token,
        }
    }

    /// Same failure attributed to a different rule.
    #[must_use]
    pub fn renamed(self, rule: impl Into<String>) -> Self {
        RuleError {
            rule: rule.into(),
            token: self.token,
        }
    }
}

/// Keeps the failure that got furthest into the input.
///
/// The first error offered is always kept. A later one replaces it only if its
/// token starts strictly after the kept one, so among failures at the same
/// position the earliest reported wins.
#[derive(Clone, Debug, Default)]
pub struct FurthestError {
    best: Option<RuleError>,
}

impl FurthestError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate. Returns `true` if it became the kept error.
    pub fn offer(&mut self, error: RuleError) -> bool {
        match &self.best {
            Some(best) if !error.token.is_after(&best.token) => false,
            _ => {
                self.best = Some(error);
                true
            }
        }
    }

    pub fn get(&self) -> Option<&RuleError> {
        self.best.as_ref()
    }

    pub fn take(&mut self) -> Option<RuleError> {
        self.best.take()
    }

    pub fn into_inner(self) -> Option<RuleError> {
        self.best
    }
}

/// A grammar that cannot be run as built.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// `or` was given nothing to choose from.
    #[error("rule `{rule}` needs at least one alternative")]
    EmptyAlternatives { rule: String },

    /// `define` was called on a rule that is not a forward declaration.
    #[error("rule `{rule}` is not a forward declaration")]
    NotForward { rule: String },

    #[error("rule `{rule}` is already defined")]
    AlreadyDefined { rule: String },

    /// A forward declaration was never given a definition.
    #[error("rule `{rule}` was declared but never defined")]
    Undefined { rule: String },

    /// Defining the forward declaration would make it resolve to itself.
    #[error("rule `{rule}` would resolve to itself")]
    Cycle { rule: String },

    #[error(transparent)]
    Pattern(#[from] LexError),
}

/// Why [`crate::Grammar::parse`] or [`crate::parse_rule`] produced no tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The furthest failure seen before the candidates ran out.
    #[error(transparent)]
    Unexpected(#[from] RuleError),

    /// The root produced neither a tree nor an error.
    #[error("parsing finished without a result")]
    Exhausted,

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),
}
