//! Tokenizer errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexError {
    /// No token definition matched at this position.
    #[error("Illegal character {ch:?} at line {line}, column {column}")]
    IllegalCharacter {
        ch: char,
        line: u32,
        column: u32,
        /// Byte offset of the character in the input.
        offset: usize,
    },

    /// A token definition's pattern is not a valid regular expression.
    #[error("invalid pattern for token `{kind}`: {source}")]
    InvalidPattern {
        kind: String,
        #[source]
        source: regex::Error,
    },
}
