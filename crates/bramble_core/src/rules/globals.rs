//! Global-rule interleaving.
//!
//! A decorated rule first skips any run of the grammar's global rules
//! (whitespace, comments), in any order, then matches the inner rule. The
//! skip is greedy: only branches that cannot skip further go on to the inner
//! rule, and a run of globals that can be split several ways still yields a
//! single branch.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::branch::Branch;
use crate::rule::{match_rule, MatchResult, Rule, RuleId, RuleRef};
use crate::token::Token;

use super::alternatives;
use super::fan_out;
use super::repeat::{repeat, Collect};

/// Which global rules may be interleaved at a rule occurrence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GlobalRules {
    /// Every global rule of the grammar.
    #[default]
    All,
    /// Every global rule except the named ones.
    Except(FxHashSet<String>),
    /// No interleaving.
    None,
}

impl GlobalRules {
    pub fn except<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GlobalRules::Except(names.into_iter().map(Into::into).collect())
    }

    pub fn allows(&self, name: &str) -> bool {
        match self {
            GlobalRules::All => true,
            GlobalRules::Except(excluded) => !excluded.contains(name),
            GlobalRules::None => false,
        }
    }

    /// Grammar notation for the exclusion: empty, `!(a, b)` or `!`.
    pub(crate) fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlobalRules::All => Ok(()),
            GlobalRules::None => f.write_str(" !"),
            GlobalRules::Except(excluded) => {
                let mut names: Vec<_> = excluded.iter().map(String::as_str).collect();
                names.sort_unstable();
                write!(f, " !({})", names.join(", "))
            }
        }
    }
}

/// Skip every run of the global rules `policy` permits, greedily.
///
/// Yields one branch per position the skip can stop at, which is just
/// `branch` itself when no permitted global rule matches.
pub(crate) fn skip_globals<T: Token>(branch: Branch<T>, policy: &GlobalRules) -> MatchResult<T> {
    let grammar = branch.shared_grammar();
    let globals: Vec<&RuleRef<T>> = grammar
        .global_rules()
        .iter()
        .filter(|rule| policy.allows(rule.name()))
        .collect();

    if globals.is_empty() {
        return Ok(vec![branch]);
    }
    repeat(vec![branch], Collect::Longest, |fork| {
        alternatives(&globals, &fork)
    })
}

/// Matches the permitted global rules greedily, then the inner rule.
pub struct Interleaved<T> {
    id: RuleId,
    inner: RuleRef<T>,
    policy: Arc<GlobalRules>,
}

impl<T: Token> Interleaved<T> {
    pub fn new(inner: RuleRef<T>, policy: Arc<GlobalRules>) -> Self {
        Interleaved {
            id: RuleId::fresh(),
            inner,
            policy,
        }
    }

    pub fn policy(&self) -> &GlobalRules {
        &self.policy
    }
}

impl<T: Token> Rule<T> for Interleaved<T> {
    fn id(&self) -> RuleId {
        self.id
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_atomic(&self) -> bool {
        true
    }

    fn match_body(&self, branch: Branch<T>) -> MatchResult<T> {
        let parallel = branch.options().parallel;
        let skipped = skip_globals(branch, &self.policy)?;
        fan_out(parallel, skipped, |branch| {
            match_rule(self.inner.as_ref(), branch)
        })
    }

    fn undecorated(&self) -> Option<&RuleRef<T>> {
        Some(&self.inner)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.describe(f)
    }
}
