//! skein parse - lazy backtracking parser combinators.
//!
//! Grammars are built from a handful of rule kinds (token, sequence, choice,
//! repetition, optional, separated list, rename) stored in a [`Grammar`]
//! arena. Applying a rule to a token slice yields [`Candidates`]: a lazy
//! stream of every way the rule can match, interleaved with the failures met
//! along the way.
//!
//! # Architecture
//!
//! - `combinators`: one `Iterator` state machine per rule kind
//! - `stream`: [`Candidates`] and [`RuleResult`]
//! - `grammar`: the rule arena, token definitions, and entry points
//! - `driver`: first success wins, otherwise the furthest failure
//!
//! # Backtracking
//!
//! A rule never commits. `Or` keeps every alternative's matches, repetitions
//! list the longest match first and the empty one last, and a sequence tries
//! each combination of its parts. The consumer decides how much of that search
//! actually runs: it pulls candidates until satisfied and cancels the rest.
//!
//! # Error Reporting
//!
//! Failures are ordinary candidates. When no parse succeeds, the reported
//! error is the one whose token is furthest into the input; ties go to the
//! failure seen first.
//!
//! ```text
//! let mut grammar = Grammar::new();
//! let int = grammar.define_token("INT", patterns::INT)?;
//! grammar.define_ignored_token("SPACE", patterns::WHITESPACE)?;
//! let ints = grammar.many("Ints", int);
//! let tree = grammar.parse(ints, "1 2 3")?;
//! ```

mod combinators;
mod driver;
mod error;
mod grammar;
mod rule;
mod stream;

use std::sync::Once;

pub use driver::{drive, parse_rule};
pub use error::{FurthestError, GrammarError, ParseError, RuleError};
pub use grammar::{Grammar, GrammarConfig, DEFAULT_ROOT_NAME};
pub use rule::{Rule, RuleId, RuleKind};
pub use stream::{CandidateStream, Candidates, RuleResult};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
