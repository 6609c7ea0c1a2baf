//! Token definitions and the tokenizer loop.


use regex::Regex;
use skein_ir::Token;
use tracing::{debug, trace};

use crate::LexError;

/// Token type of the end-of-input token unless configured otherwise.
pub const DEFAULT_EOF_KIND: &str = "EOF";

/// A token type and the pattern recognizing it.
///
/// The pattern is anchored at the current input position; callers may include
/// a leading `^` or leave it out.
#[derive(Clone, Debug)]
pub struct TokenDef {
    kind: String,
    pattern: Regex,
}

impl TokenDef {
    pub fn new(kind: impl Into<String>, pattern: &str) -> Result<Self, LexError> {
        let kind = kind.into();
        match Regex::new(&format!("^(?:{pattern})")) {
            Ok(pattern) => Ok(TokenDef { kind, pattern }),
            Err(source) => Err(LexError::InvalidPattern { kind, source }),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Length in bytes of the non-empty prefix of `rest` this definition matches.
    fn match_len(&self, rest: &str) -> Option<usize> {
        self.pattern
            .find(rest)
            .filter(|m| m.start() == 0 && !m.is_empty())
            .map(|m| m.end())
    }
}

/// Tokenizer settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LexerConfig {
    /// Type of the token appended after the last real token.
    pub eof_kind: String,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            eof_kind: DEFAULT_EOF_KIND.to_string(),
        }
    }
}

impl LexerConfig {
    #[must_use]
    pub fn eof_kind(mut self, kind: impl Into<String>) -> Self {
        self.eof_kind = kind.into();
        self
    }
}

/// Ordered token definitions, tried first-match-wins.
#[derive(Clone, Debug, Default)]
pub struct Lexer {
    defs: Vec<TokenDef>,
    config: LexerConfig,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LexerConfig) -> Self {
        Lexer {
            defs: Vec::new(),
            config,
        }
    }

    /// Append a definition. Earlier definitions take priority.
    pub fn push(&mut self, def: TokenDef) {
        self.defs.push(def);
    }

    /// Compile `pattern` and append it as a definition for `kind`.
    pub fn define(&mut self, kind: impl Into<String>, pattern: &str) -> Result<(), LexError> {
        self.push(TokenDef::new(kind, pattern)?);
        Ok(())
    }

    pub fn defs(&self) -> &[TokenDef] {
        &self.defs
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, LexError> {
        run(&self.defs, &self.config.eof_kind, input)
    }
}

/// Tokenize `input` with `defs` and the default end-of-input type.
pub fn tokenize(input: &str, defs: &[TokenDef]) -> Result<Vec<Token>, LexError> {
    run(defs, DEFAULT_EOF_KIND, input)
}

fn run(defs: &[TokenDef], eof_kind: &str, input: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    let mut line = 1;
    let mut column = 1;

    while let Some(ch) = input[offset..].chars().next() {
        let rest = &input[offset..];
        let Some((def, len)) = defs
            .iter()
            .find_map(|def| def.match_len(rest).map(|len| (def, len)))
        else {
            trace!(offset, line, column, ?ch, "no token definition matched");
            return Err(LexError::IllegalCharacter {
                ch,
                line,
                column,
                offset,
            });
        };

        let text = &rest[..len];
        tokens.push(Token::new(def.kind.as_str(), text, line, column));
        for c in text.chars() {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        offset += len;
    }

    tokens.push(Token::new(eof_kind, "", line, column));
    debug!(count = tokens.len(), bytes = input.len(), "tokenized input");
    Ok(tokens)
}
