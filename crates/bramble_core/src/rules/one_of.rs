use std::fmt;

use crate::branch::Branch;
use crate::rule::{MatchResult, Rule, RuleId, RuleRef};
use crate::token::Token;
use crate::{Error, Result};

use super::{alternatives, describe_joined};

/// Alternation: every alternative is tried on its own fork and every success
/// survives.
///
/// Alternatives run undecorated, since global interleaving, if any, wraps
/// the alternation as a whole.
pub struct OneOf<T> {
    id: RuleId,
    rules: Vec<RuleRef<T>>,
}

impl<T: Token> OneOf<T> {
    pub fn new(rules: Vec<RuleRef<T>>) -> Result<Self> {
        if rules.is_empty() {
            return Err(Error::invalid_argument(
                "an alternation needs at least one rule",
            ));
        }
        Ok(OneOf {
            id: RuleId::fresh(),
            rules,
        })
    }

    pub fn rules(&self) -> &[RuleRef<T>] {
        &self.rules
    }
}

impl<T: Token> Rule<T> for OneOf<T> {
    fn id(&self) -> RuleId {
        self.id
    }

    fn name(&self) -> &str {
        "OneOf"
    }

    fn is_atomic(&self) -> bool {
        true
    }

    fn match_body(&self, branch: Branch<T>) -> MatchResult<T> {
        let undecorated: Vec<&RuleRef<T>> = self
            .rules
            .iter()
            .map(|rule| rule.undecorated().unwrap_or(rule))
            .collect();
        alternatives(&undecorated, &branch)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("( ")?;
        describe_joined(f, &self.rules, " | ")?;
        f.write_str(" )")
    }
}
