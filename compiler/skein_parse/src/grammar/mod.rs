//! Grammar construction and the parse entry points.
//!
//! A [`Grammar`] owns three things: the rule arena, the token definitions
//! used to tokenize input, and the set of token types dropped before
//! parsing. Rules are built bottom-up with the builder methods, each of which
//! returns the new rule's [`RuleId`]. Recursive rules are built through a
//! forward declaration:
//!
//! ```text
//! let value = grammar.declare("Value");
//! let list = grammar.many_with_separator("List", value, comma);
//! let array = grammar.seq("Array", [open, list, close]);
//! let body = grammar.or("ValueBody", [number, array])?;
//! grammar.define(value, body)?;
//! ```


use rustc_hash::{FxHashMap, FxHashSet};
use skein_ir::{Node, Token};
use skein_lexer::{LexError, Lexer, LexerConfig, DEFAULT_EOF_KIND};
use tracing::{debug, trace};

use crate::combinators::{self, SeqStream};
use crate::driver;
use crate::rule::{Rule, RuleKind};
use crate::{Candidates, GrammarError, ParseError, RuleId};

/// Name of the node wrapping a whole parse unless configured otherwise.
pub const DEFAULT_ROOT_NAME: &str = "Root";

/// Settings for the parse entry points.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrammarConfig {
    /// Label of the node produced by [`Grammar::parse`]: the root rule's
    /// node followed by the end-of-input leaf.
    pub root_name: String,
    /// Token type that marks the end of input.
    pub eof_kind: String,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        GrammarConfig {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            eof_kind: DEFAULT_EOF_KIND.to_string(),
        }
    }
}

impl GrammarConfig {
    #[must_use]
    pub fn root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    #[must_use]
    pub fn eof_kind(mut self, kind: impl Into<String>) -> Self {
        self.eof_kind = kind.into();
        self
    }
}

/// A set of rules plus the token definitions they consume.
#[derive(Debug)]
pub struct Grammar {
    rules: Vec<Rule>,
    names: FxHashMap<String, RuleId>,
    lexer: Lexer,
    ignored: FxHashSet<String>,
    config: GrammarConfig,
    eof: RuleId,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar {
    pub fn new() -> Self {
        Self::with_config(GrammarConfig::default())
    }

    pub fn with_config(config: GrammarConfig) -> Self {
        let lexer = Lexer::with_config(LexerConfig::default().eof_kind(config.eof_kind.clone()));
        let mut grammar = Grammar {
            rules: Vec::new(),
            names: FxHashMap::default(),
            lexer,
            ignored: FxHashSet::default(),
            eof: RuleId::new(0),
            config,
        };
        let eof_kind = grammar.config.eof_kind.clone();
        grammar.eof = grammar.token_type(eof_kind.clone(), eof_kind);
        grammar
    }

    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    /// The rule matching the end-of-input token.
    pub fn eof(&self) -> RuleId {
        self.eof
    }

    /// Number of rules in the arena, hidden helper rules included.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Look a named rule up. The most recent rule registered under `name` wins.
    pub fn rule(&self, name: &str) -> Option<RuleId> {
        self.names.get(name).copied()
    }

    pub fn name(&self, id: RuleId) -> &str {
        &self.get(id).name
    }

    pub fn get(&self, id: RuleId) -> &Rule {
        &self.rules[id.index()]
    }

    fn push(&mut self, name: String, kind: RuleKind) -> RuleId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "rule arenas stay far below u32::MAX entries"
        )]
        let id = RuleId::new(self.rules.len() as u32);
        trace!(rule = %name, id = id.raw(), "rule allocated");
        self.rules.push(Rule { name, kind });
        id
    }

    fn alloc(&mut self, name: impl Into<String>, kind: RuleKind) -> RuleId {
        let name = name.into();
        let id = self.push(name.clone(), kind);
        self.names.insert(name, id);
        id
    }

    // === Builders ===

    /// Match one token of type `kind`.
    pub fn token_type(&mut self, name: impl Into<String>, kind: impl Into<String>) -> RuleId {
        self.alloc(
            name,
            RuleKind::Token {
                kind: kind.into(),
                text: None,
            },
        )
    }

    /// Match one token of type `kind` whose text is exactly `text`.
    pub fn token_value(
        &mut self,
        name: impl Into<String>,
        kind: impl Into<String>,
        text: impl Into<String>,
    ) -> RuleId {
        self.alloc(
            name,
            RuleKind::Token {
                kind: kind.into(),
                text: Some(text.into()),
            },
        )
    }

    /// Match `rules` back to back. An empty sequence matches without
    /// consuming anything.
    pub fn seq(
        &mut self,
        name: impl Into<String>,
        rules: impl IntoIterator<Item = RuleId>,
    ) -> RuleId {
        self.alloc(name, RuleKind::Seq(rules.into_iter().collect()))
    }

    /// Try every alternative in order, keeping each one's successes.
    pub fn or(
        &mut self,
        name: impl Into<String>,
        alternatives: impl IntoIterator<Item = RuleId>,
    ) -> Result<RuleId, GrammarError> {
        let name = name.into();
        let alternatives: Vec<RuleId> = alternatives.into_iter().collect();
        if alternatives.is_empty() {
            return Err(GrammarError::EmptyAlternatives { rule: name });
        }
        Ok(self.alloc(name, RuleKind::Or(alternatives)))
    }

    pub fn many(&mut self, name: impl Into<String>, item: RuleId) -> RuleId {
        self.alloc(name, RuleKind::Many(item))
    }

    pub fn one_or_many(&mut self, name: impl Into<String>, item: RuleId) -> RuleId {
        self.alloc(name, RuleKind::OneOrMany(item))
    }

    pub fn one_or_none(&mut self, name: impl Into<String>, item: RuleId) -> RuleId {
        self.alloc(name, RuleKind::OneOrNone(item))
    }

    /// `item (separator item)*`, or nothing.
    pub fn many_with_separator(
        &mut self,
        name: impl Into<String>,
        item: RuleId,
        separator: RuleId,
    ) -> RuleId {
        self.separated(name.into(), item, separator, false)
    }

    /// `item (separator item)*`.
    pub fn one_or_many_with_separator(
        &mut self,
        name: impl Into<String>,
        item: RuleId,
        separator: RuleId,
    ) -> RuleId {
        self.separated(name.into(), item, separator, true)
    }

    fn separated(
        &mut self,
        name: String,
        item: RuleId,
        separator: RuleId,
        at_least_one: bool,
    ) -> RuleId {
        let tail_item = self.push(
            format!("{name}:TailItem"),
            RuleKind::Seq(vec![separator, item]),
        );
        let tail = self.push(format!("{name}:Tail"), RuleKind::Many(tail_item));
        self.alloc(
            name,
            RuleKind::Separated {
                item,
                tail,
                at_least_one,
            },
        )
    }

    /// `rule`'s results, relabeled as `name`.
    pub fn rename(&mut self, name: impl Into<String>, rule: RuleId) -> RuleId {
        self.alloc(name, RuleKind::Rename(rule))
    }

    // === Forward references ===

    /// A placeholder for a rule defined later with [`Grammar::define`].
    ///
    /// Returns the existing rule if `name` is already registered, so a
    /// forward reference can be taken to a rule that may or may not exist yet.
    pub fn declare(&mut self, name: impl Into<String>) -> RuleId {
        let name = name.into();
        match self.names.get(&name) {
            Some(&id) => id,
            None => self.alloc(name, RuleKind::Forward(None)),
        }
    }

    /// Point the forward declaration `cell` at `target`.
    pub fn define(&mut self, cell: RuleId, target: RuleId) -> Result<(), GrammarError> {
        let rule = self.get(cell);
        match rule.kind {
            RuleKind::Forward(None) => {}
            RuleKind::Forward(Some(_)) => {
                return Err(GrammarError::AlreadyDefined {
                    rule: rule.name.clone(),
                })
            }
            _ => {
                return Err(GrammarError::NotForward {
                    rule: rule.name.clone(),
                })
            }
        }
        if self.resolves_to(target, cell) {
            return Err(GrammarError::Cycle {
                rule: rule.name.clone(),
            });
        }
        trace!(rule = %rule.name, target = self.name(target), "forward rule defined");
        self.rules[cell.index()].kind = RuleKind::Forward(Some(target));
        Ok(())
    }

    /// Whether following forward links from `id` reaches `cell`.
    fn resolves_to(&self, mut id: RuleId, cell: RuleId) -> bool {
        loop {
            if id == cell {
                return true;
            }
            match self.get(id).kind {
                RuleKind::Forward(Some(next)) => id = next,
                _ => return false,
            }
        }
    }

    /// Fail if any forward declaration is still undefined.
    pub fn validate(&self) -> Result<(), GrammarError> {
        match self
            .rules
            .iter()
            .find(|rule| matches!(rule.kind, RuleKind::Forward(None)))
        {
            Some(rule) => Err(GrammarError::Undefined {
                rule: rule.name.clone(),
            }),
            None => Ok(()),
        }
    }

    // === Tokens ===

    /// Add a token definition and a rule matching tokens of that type.
    ///
    /// Definitions are tried in the order they were added.
    pub fn define_token(
        &mut self,
        name: impl Into<String>,
        pattern: &str,
    ) -> Result<RuleId, GrammarError> {
        let name = name.into();
        self.lexer.define(name.clone(), pattern)?;
        Ok(self.token_type(name.clone(), name))
    }

    /// Like [`Grammar::define_token`], and drop the tokens before parsing.
    pub fn define_ignored_token(
        &mut self,
        name: impl Into<String>,
        pattern: &str,
    ) -> Result<RuleId, GrammarError> {
        let name = name.into();
        let id = self.define_token(name.clone(), pattern)?;
        self.ignore(name);
        Ok(id)
    }

    /// Drop tokens of type `kind` before parsing.
    pub fn ignore(&mut self, kind: impl Into<String>) {
        self.ignored.insert(kind.into());
    }

    pub fn ignored(&self) -> &FxHashSet<String> {
        &self.ignored
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, LexError> {
        self.lexer.tokenize(input)
    }

    // === Running ===

    /// Apply `rule` to `tokens`, producing its candidates lazily.
    pub fn check<'a>(&'a self, rule: RuleId, tokens: &'a [Token]) -> Candidates<'a> {
        combinators::check(self, rule, tokens)
    }

    /// Tokenize `input` and parse it as `root` followed by end of input.
    ///
    /// The tree is labeled with the configured root name and holds the
    /// `root` node and the end-of-input leaf.
    #[tracing::instrument(level = "debug", skip_all, fields(root = self.name(root)))]
    pub fn parse(&self, root: RuleId, input: &str) -> Result<Node, ParseError> {
        let tokens = self.tokenize(input)?;
        self.parse_tokens(root, &tokens)
    }

    /// Parse already tokenized input. Ignored token types are dropped first.
    pub fn parse_tokens(&self, root: RuleId, tokens: &[Token]) -> Result<Node, ParseError> {
        self.validate()?;
        let tokens = driver::without_ignored(tokens, |kind| self.ignored.contains(kind));
        debug!(tokens = tokens.len(), "parsing");
        let rules = [root, self.eof];
        let stream = SeqStream::new(self, &self.config.root_name, &rules, &tokens);
        driver::drive(Candidates::from_stream(stream))
    }
}
