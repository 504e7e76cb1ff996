use std::fmt;
use std::sync::Arc;

use crate::branch::Branch;
use crate::rule::{match_rule, MatchResult, Rule, RuleId, RuleRef};
use crate::token::Token;
use crate::{Error, Result};

use super::{GlobalRules, RuleFactory};

/// A named grammar production.
///
/// Productions are the rules a grammar registers and the nodes a parse tree
/// is made of. The global-rule policy records how the body's factory was
/// configured, for display.
pub struct Production<T> {
    id: RuleId,
    name: String,
    body: RuleRef<T>,
    atomic: bool,
    globals: Arc<GlobalRules>,
}

impl<T: Token> Production<T> {
    pub fn new(name: impl Into<String>, body: RuleRef<T>) -> Result<Self> {
        Self::with_policy(name.into(), body, Arc::new(GlobalRules::All))
    }

    /// Build the body with a [`RuleFactory`] that interleaves `globals`.
    ///
    /// ```text
    /// Production::define("Pair", GlobalRules::All, |rules| {
    ///     rules.sequence(vec![rules.rule("Key")?, rules.tokens(vec![Tok::Eq], Exact)?, rules.rule("Value")?])
    /// })
    /// ```
    pub fn define(
        name: impl Into<String>,
        globals: GlobalRules,
        build: impl FnOnce(&RuleFactory<T>) -> Result<RuleRef<T>>,
    ) -> Result<Self> {
        let factory = RuleFactory::new(globals);
        let body = build(&factory)?;
        Self::with_policy(name.into(), body, factory.shared_policy())
    }

    fn with_policy(name: String, body: RuleRef<T>, globals: Arc<GlobalRules>) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::invalid_argument("a production needs a name"));
        }
        Ok(Production {
            id: RuleId::fresh(),
            name,
            body,
            atomic: false,
            globals,
        })
    }

    /// Keep matches of this production out of the tree.
    #[must_use]
    pub fn atomic(mut self) -> Self {
        self.atomic = true;
        self
    }

    pub fn body(&self) -> &RuleRef<T> {
        &self.body
    }

    pub fn globals(&self) -> &GlobalRules {
        &self.globals
    }

    pub fn into_rule(self) -> RuleRef<T> {
        Arc::new(self)
    }
}

impl<T: Token> Rule<T> for Production<T> {
    fn id(&self) -> RuleId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_atomic(&self) -> bool {
        self.atomic
    }

    fn match_body(&self, branch: Branch<T>) -> MatchResult<T> {
        match_rule(self.body.as_ref(), branch)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        self.globals.describe(f)?;
        f.write_str(" = ")?;
        self.body.describe(f)
    }
}
