//! Rule implementations.
//!
//! Structural combinators (sequence, alternation, repetition, references,
//! interleaving) and the token terminals are atomic: only productions and
//! author-supplied terminals appear in the parse tree.
//!
//! Sibling attempts fan out on the rayon pool when the parse runs in
//! parallel mode and there is more than one of them.

mod factory;
mod globals;
mod one_of;
mod production;
mod reference;
mod repeat;
mod sequence;
mod terminal;

pub use factory::RuleFactory;
pub use globals::{GlobalRules, Interleaved};
pub(crate) use globals::skip_globals;
pub use one_of::OneOf;
pub use production::Production;
pub use reference::Reference;
pub use repeat::{OneOrMore, Optional, ZeroOrMore};
pub use sequence::Sequence;
pub use terminal::{LiteralSequence, Terminal, TokenRange};

use rayon::prelude::*;

use std::fmt;

use crate::branch::Branch;
use crate::rule::{match_rule, Branches, MatchResult, RuleRef};
use crate::token::Token;
use crate::Result;

/// Run `attempt` over every item and keep each item's survivors apart.
pub(crate) fn fan_out_each<T, I, F>(
    parallel: bool,
    items: Vec<I>,
    attempt: F,
) -> Result<Vec<Branches<T>>>
where
    T: Token,
    I: Send,
    F: Fn(I) -> MatchResult<T> + Send + Sync,
{
    if parallel && items.len() > 1 {
        items.into_par_iter().map(attempt).collect()
    } else {
        items.into_iter().map(attempt).collect()
    }
}

/// Run `attempt` over every item and union the survivors in item order.
pub(crate) fn fan_out<T, I, F>(parallel: bool, items: Vec<I>, attempt: F) -> MatchResult<T>
where
    T: Token,
    I: Send,
    F: Fn(I) -> MatchResult<T> + Send + Sync,
{
    let outcomes = fan_out_each(parallel, items, attempt)?;
    Ok(outcomes.into_iter().flatten().collect())
}

/// Attempt every alternative on its own fork of `branch`.
pub(crate) fn alternatives<T: Token>(
    rules: &[&RuleRef<T>],
    branch: &Branch<T>,
) -> MatchResult<T> {
    let attempts: Vec<_> = rules.iter().map(|&rule| (rule, branch.fork())).collect();
    fan_out(branch.options().parallel, attempts, |(rule, fork)| {
        match_rule(rule.as_ref(), fork)
    })
}

/// Rule descriptions joined by `separator`.
pub(crate) fn describe_joined<T: Token>(
    f: &mut fmt::Formatter<'_>,
    rules: &[RuleRef<T>],
    separator: &str,
) -> fmt::Result {
    for (index, rule) in rules.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        rule.describe(f)?;
    }
    Ok(())
}
