#![allow(clippy::unwrap_used, reason = "test fixtures")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::rules::{LiteralSequence, Terminal};
use crate::token::{Exact, SliceSource};
use crate::{Branch, Grammar, ParseOptions, RuleRef};

pub(crate) const END: char = '\0';

pub(crate) fn chars(input: &str) -> SliceSource<char> {
    SliceSource::new(input.chars().collect::<Vec<_>>(), END)
}

pub(crate) fn branch_over(grammar: Grammar<char>, input: &str) -> Branch<char> {
    Branch::new(
        Arc::new(grammar),
        Box::new(chars(input)),
        ParseOptions::default().sequential(),
    )
}

pub(crate) fn branch(input: &str) -> Branch<char> {
    branch_over(Grammar::new(), input)
}

pub(crate) fn lit(text: &str) -> RuleRef<char> {
    Arc::new(LiteralSequence::new(text.chars().collect(), Exact).unwrap())
}

/// Atomic terminal consuming one or more spaces.
pub(crate) fn spaces() -> RuleRef<char> {
    Arc::new(
        Terminal::new("Space", |branch: &mut Branch<char>| {
            let mut consumed = false;
            while !branch.is_at_end() && *branch.current() == ' ' {
                branch.advance()?;
                consumed = true;
            }
            Ok(consumed)
        })
        .atomic(),
    )
}

/// Terminal that never matches and counts how often it was tried.
pub(crate) fn never(calls: &Arc<AtomicUsize>) -> RuleRef<char> {
    let calls = Arc::clone(calls);
    Arc::new(Terminal::new("Never", move |_: &mut Branch<char>| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    }))
}

/// Consumed length of every branch, in result order.
pub(crate) fn positions(branches: &[Branch<char>]) -> Vec<usize> {
    branches.iter().map(Branch::position).collect()
}
