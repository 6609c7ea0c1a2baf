//! Pattern-driven tokenizer.
//!
//! Turns raw text into the flat token list rules consume. A [`Lexer`] holds an
//! ordered list of [`TokenDef`]s; at every position the first definition whose
//! pattern matches a non-empty prefix wins. A single end-of-input token is
//! appended once the whole input has been consumed.
//!
//! Failure to match any definition is fatal: the parser never sees partially
//! tokenized input.
//!
//! ```text
//! let mut lexer = Lexer::new();
//! lexer.define("INT", patterns::INT)?;
//! lexer.define("SPACE", patterns::WHITESPACE)?;
//! let tokens = lexer.tokenize("1 2")?; // INT SPACE INT EOF
//! ```

mod error;
mod lexer;
pub mod patterns;

pub use error::LexError;
pub use lexer::{tokenize, Lexer, LexerConfig, TokenDef, DEFAULT_EOF_KIND};
