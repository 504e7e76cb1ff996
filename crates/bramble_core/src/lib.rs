//! Backtracking parser-combinator engine.
//!
//! A [`Grammar`] maps names to [`Rule`]s. Parsing starts one [`Branch`] at
//! the beginning of a token stream and lets rules fork it wherever the input
//! can be read more than one way; every branch that reaches the end of the
//! entry rule is a complete interpretation with its own [`ParseTree`].
//!
//! # Left recursion
//!
//! Each branch counts how often each rule was entered at the current token
//! position. A third entrance is pruned, which stops left-recursive loops
//! while still allowing one nested self-reference. Consuming a token resets
//! every count.
//!
//! # Concurrency
//!
//! Sibling attempts (alternatives, live branches of a sequence, frontier
//! branches of a repetition) fan out on the rayon pool. Branches share no
//! mutable state: the grammar is read-only and completed tree nodes are
//! immutable.

mod branch;
mod error;
mod grammar;
mod options;
mod parser;
mod rule;
pub mod rules;
pub mod token;
mod tree;

#[cfg(test)]
mod test_support;

use std::sync::Once;

pub use branch::{Branch, ROOT_BRANCH_ID};
pub use error::{Error, Result};
pub use grammar::Grammar;
pub use options::{CancellationToken, ParseOptions};
pub use parser::Parser;
pub use rule::{match_rule, Branches, MatchResult, Rule, RuleId, RuleRef};
pub use token::{SliceSource, Token, TokenSource};
pub use tree::{Node, NodeId, ParseTree};

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical tracing subscriber if `RUST_LOG` is set.
///
/// Rule entry and exit are logged at `trace`, so
/// `RUST_LOG=bramble_core=trace` prints the exploration as an indented tree
/// of branch ids. Safe to call repeatedly; only the first call has effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // A subscriber may already be installed by the host application.
            let _ = tracing_subscriber::registry()
                .with(HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .try_init();
        }
    });
}
