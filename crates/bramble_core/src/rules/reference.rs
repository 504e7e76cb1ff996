use std::fmt;

use crate::branch::Branch;
use crate::rule::{match_rule, MatchResult, Rule, RuleId};
use crate::token::Token;
use crate::{Error, Result};

/// Late-bound rule lookup by name.
///
/// The target is resolved from the branch's grammar on every match, so
/// productions may refer to rules registered after them, or to themselves.
pub struct Reference<T> {
    id: RuleId,
    target: String,
    _token: std::marker::PhantomData<fn() -> T>,
}

impl<T: Token> Reference<T> {
    pub fn new(target: impl Into<String>) -> Result<Self> {
        let target = target.into();
        if target.is_empty() {
            return Err(Error::invalid_argument("a rule reference needs a name"));
        }
        Ok(Reference {
            id: RuleId::fresh(),
            target,
            _token: std::marker::PhantomData,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl<T: Token> Rule<T> for Reference<T> {
    fn id(&self) -> RuleId {
        self.id
    }

    fn name(&self) -> &str {
        &self.target
    }

    fn is_atomic(&self) -> bool {
        true
    }

    fn match_body(&self, branch: Branch<T>) -> MatchResult<T> {
        let grammar = branch.shared_grammar();
        let rule = grammar.get_rule(&self.target)?;
        match_rule(rule.as_ref(), branch)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.target)
    }
}
