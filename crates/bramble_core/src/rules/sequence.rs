use std::fmt;

use crate::branch::Branch;
use crate::rule::{match_rule, MatchResult, Rule, RuleId, RuleRef};
use crate::token::Token;
use crate::{Error, Result};

use super::{describe_joined, fan_out};

/// Sub-rules matched one after another.
///
/// Every live branch attempts the next sub-rule; a branch that matches it in
/// several ways forks into several live branches. An empty live set ends the
/// sequence without attempting the remaining sub-rules.
pub struct Sequence<T> {
    id: RuleId,
    rules: Vec<RuleRef<T>>,
}

impl<T: Token> Sequence<T> {
    pub fn new(rules: Vec<RuleRef<T>>) -> Result<Self> {
        if rules.is_empty() {
            return Err(Error::invalid_argument("a sequence needs at least one rule"));
        }
        Ok(Sequence {
            id: RuleId::fresh(),
            rules,
        })
    }

    pub fn rules(&self) -> &[RuleRef<T>] {
        &self.rules
    }
}

impl<T: Token> Rule<T> for Sequence<T> {
    fn id(&self) -> RuleId {
        self.id
    }

    fn name(&self) -> &str {
        "Sequence"
    }

    fn is_atomic(&self) -> bool {
        true
    }

    fn match_body(&self, branch: Branch<T>) -> MatchResult<T> {
        let parallel = branch.options().parallel;
        let mut live = vec![branch];
        for rule in &self.rules {
            live = fan_out(parallel, live, |branch| match_rule(rule.as_ref(), branch))?;
            if live.is_empty() {
                break;
            }
        }
        Ok(live)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe_joined(f, &self.rules, " ")
    }
}
