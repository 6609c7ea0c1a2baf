//! Rule definitions stored in a [`crate::Grammar`] arena.
//!
//! Rules refer to each other by [`RuleId`] rather than by pointer, which is
//! what lets a grammar be recursive: a [`RuleKind::Forward`] cell is allocated
//! first, handed to the rules that need it, and pointed at its definition
//! afterwards.

use std::fmt;

/// Index into a grammar's rule arena.
///
/// Only meaningful for the grammar that allocated it. Ids are handed out by
/// the grammar's builders and cannot be made up from outside:
///
/// ```compile_fail
/// let forged = skein_parse::RuleId::new(7);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct RuleId(u32);

impl RuleId {
    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        RuleId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleId({})", self.0)
    }
}

/// A named rule. The name labels every node and error the rule produces.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rule {
    pub name: String,
    pub kind: RuleKind,
}

/// What a rule does when applied to a token slice.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RuleKind {
    /// Match one token of type `kind`, and text `text` when given.
    Token { kind: String, text: Option<String> },
    /// Every rule in order.
    Seq(Vec<RuleId>),
    /// Each alternative in order, every success kept.
    Or(Vec<RuleId>),
    /// Zero or more repetitions, longest first.
    Many(RuleId),
    /// One or more repetitions, longest first.
    OneOrMany(RuleId),
    /// The rule once, or nothing.
    OneOrNone(RuleId),
    /// `item (separator item)*`, flattened.
    ///
    /// `tail` is a hidden `Many` over a `Seq(separator, item)`.
    Separated {
        item: RuleId,
        tail: RuleId,
        at_least_one: bool,
    },
    /// Another rule's results under this rule's name.
    Rename(RuleId),
    /// A placeholder resolved after construction. `None` until defined.
    Forward(Option<RuleId>),
}
