//! Optional and repeated matches.
//!
//! Repetition keeps a frontier of branches that may attempt one more
//! repetition. Each round attempts the inner rule on a fork of every frontier
//! branch; the forks that advanced form the next frontier. A success that
//! consumed nothing is not carried forward, otherwise a nullable inner rule
//! would repeat forever at one position.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::branch::Branch;
use crate::rule::{match_rule, Branches, MatchResult, Rule, RuleId, RuleRef};
use crate::token::Token;

use super::fan_out_each;

/// Which frontier branches a repetition reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Collect {
    /// Every repetition count is a separate interpretation.
    EveryCount,
    /// Only branches that could not repeat any further, one per reached
    /// position. Different splits of the same run collapse into the first
    /// one explored.
    Longest,
}

/// Repeat `attempt` from each branch of `seed` until no branch advances.
pub(crate) fn repeat<T, F>(seed: Branches<T>, collect: Collect, attempt: F) -> MatchResult<T>
where
    T: Token,
    F: Fn(Branch<T>) -> MatchResult<T> + Send + Sync,
{
    let Some(parallel) = seed.first().map(|branch| branch.options().parallel) else {
        return Ok(Vec::new());
    };

    let mut reached: FxHashSet<usize> = seed.iter().map(Branch::position).collect();
    let mut results = Vec::new();
    let mut frontier = seed;
    while !frontier.is_empty() {
        let forks: Vec<_> = frontier.iter().map(Branch::fork).collect();
        let outcomes = fan_out_each(parallel, forks, &attempt)?;

        let mut next = Vec::new();
        for (origin, extended) in frontier.into_iter().zip(outcomes) {
            let start = origin.position();
            let mut progressed = false;
            for branch in extended {
                if branch.position() <= start {
                    continue;
                }
                progressed = true;
                if collect == Collect::Longest && !reached.insert(branch.position()) {
                    continue;
                }
                next.push(branch);
            }
            if collect == Collect::EveryCount || !progressed {
                results.push(origin);
            }
        }
        frontier = next;
    }
    Ok(results)
}

/// Zero or one match of the inner rule.
pub struct Optional<T> {
    id: RuleId,
    rule: RuleRef<T>,
}

impl<T: Token> Optional<T> {
    pub fn new(rule: RuleRef<T>) -> Self {
        Optional {
            id: RuleId::fresh(),
            rule,
        }
    }
}

impl<T: Token> Rule<T> for Optional<T> {
    fn id(&self) -> RuleId {
        self.id
    }

    fn name(&self) -> &str {
        "Optional"
    }

    fn is_atomic(&self) -> bool {
        true
    }

    fn match_body(&self, branch: Branch<T>) -> MatchResult<T> {
        let taken = match_rule(self.rule.as_ref(), branch.fork())?;
        let mut survivors = Vec::with_capacity(taken.len() + 1);
        survivors.push(branch);
        survivors.extend(taken);
        Ok(survivors)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        self.rule.describe(f)?;
        f.write_str(" ]")
    }
}

/// Any number of matches, each count a separate interpretation.
pub struct ZeroOrMore<T> {
    id: RuleId,
    rule: RuleRef<T>,
}

impl<T: Token> ZeroOrMore<T> {
    pub fn new(rule: RuleRef<T>) -> Self {
        ZeroOrMore {
            id: RuleId::fresh(),
            rule,
        }
    }
}

impl<T: Token> Rule<T> for ZeroOrMore<T> {
    fn id(&self) -> RuleId {
        self.id
    }

    fn name(&self) -> &str {
        "ZeroOrMore"
    }

    fn is_atomic(&self) -> bool {
        true
    }

    fn match_body(&self, branch: Branch<T>) -> MatchResult<T> {
        repeat(vec![branch], Collect::EveryCount, |fork| {
            match_rule(self.rule.as_ref(), fork)
        })
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rule.describe(f)?;
        f.write_str("*")
    }
}

/// At least one match, then as [`ZeroOrMore`].
pub struct OneOrMore<T> {
    id: RuleId,
    rule: RuleRef<T>,
}

impl<T: Token> OneOrMore<T> {
    pub fn new(rule: RuleRef<T>) -> Self {
        OneOrMore {
            id: RuleId::fresh(),
            rule,
        }
    }
}

impl<T: Token> Rule<T> for OneOrMore<T> {
    fn id(&self) -> RuleId {
        self.id
    }

    fn name(&self) -> &str {
        "OneOrMore"
    }

    fn is_atomic(&self) -> bool {
        true
    }

    fn match_body(&self, branch: Branch<T>) -> MatchResult<T> {
        let start = branch.position();
        let first = match_rule(self.rule.as_ref(), branch)?;

        // A first match that consumed nothing is reported but not repeated.
        let (seed, empty): (Vec<_>, Vec<_>) =
            first.into_iter().partition(|branch| branch.position() > start);
        let mut survivors = empty;
        survivors.extend(repeat(seed, Collect::EveryCount, |fork| {
            match_rule(self.rule.as_ref(), fork)
        })?);
        Ok(survivors)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rule.describe(f)?;
        f.write_str("+")
    }
}
