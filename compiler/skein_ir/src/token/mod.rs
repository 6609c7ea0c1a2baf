//! Tokens produced by the tokenizer and consumed by rules.


use std::fmt;

/// Token type used for the synthetic token reported when a rule runs out of input.
pub const END_OF_STREAM_KIND: &str = "END_OF_STREAM";

/// Start position of a token in the source text.
///
/// Lines start at 1. Columns start at 1 for tokens produced by the tokenizer;
/// the synthetic end-of-stream token sits at `0:0`, before everything else.
///
/// The derived ordering compares the line first, then the column.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One lexical unit: a type tag, the literal text it matched, and its position.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// Type tag assigned by the token definition that matched.
    pub kind: String,
    /// Literal source text.
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: impl Into<String>, text: impl Into<String>, line: u32, column: u32) -> Self {
        Token {
            kind: kind.into(),
            text: text.into(),
            line,
            column,
        }
    }

    /// The token reported when a rule is applied to an empty token slice.
    pub fn end_of_stream() -> Self {
        Token::new(END_OF_STREAM_KIND, "", 0, 0)
    }

    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Returns `true` if `self` starts strictly later in the input than `other`.
    ///
    /// Used to rank failures: the error whose token is furthest into the
    /// input is the most informative one.
    #[inline]
    pub fn is_after(&self, other: &Token) -> bool {
        self.position() > other.position()
    }

    #[inline]
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}) @ {}", self.kind, self.text, self.position())
    }
}
