use std::marker::PhantomData;
use std::sync::Arc;

use crate::rule::RuleRef;
use crate::token::{Token, TokenEquality, TokenOrdering};
use crate::Result;

use super::{
    GlobalRules, Interleaved, LiteralSequence, OneOf, OneOrMore, Optional, Reference, Sequence,
    TokenRange, ZeroOrMore,
};

/// Builds rule bodies under one global-rule policy.
///
/// Alternations, terminals and rule references are wrapped in
/// [`Interleaved`] unless the policy is [`GlobalRules::None`]. Sequences,
/// optionals and repetitions are left bare: their parts are already
/// decorated.
pub struct RuleFactory<T> {
    policy: Arc<GlobalRules>,
    _token: PhantomData<fn() -> T>,
}

impl<T: Token> RuleFactory<T> {
    pub fn new(policy: GlobalRules) -> Self {
        RuleFactory {
            policy: Arc::new(policy),
            _token: PhantomData,
        }
    }

    pub fn policy(&self) -> &GlobalRules {
        &self.policy
    }

    pub(crate) fn shared_policy(&self) -> Arc<GlobalRules> {
        Arc::clone(&self.policy)
    }

    /// Apply this factory's interleaving to an arbitrary rule.
    pub fn decorate(&self, rule: RuleRef<T>) -> RuleRef<T> {
        if *self.policy == GlobalRules::None {
            rule
        } else {
            Arc::new(Interleaved::new(rule, Arc::clone(&self.policy)))
        }
    }

    pub fn sequence(&self, rules: Vec<RuleRef<T>>) -> Result<RuleRef<T>> {
        Ok(Arc::new(Sequence::new(rules)?))
    }

    pub fn one_of(&self, rules: Vec<RuleRef<T>>) -> Result<RuleRef<T>> {
        Ok(self.decorate(Arc::new(OneOf::new(rules)?)))
    }

    pub fn optional(&self, rule: RuleRef<T>) -> RuleRef<T> {
        Arc::new(Optional::new(rule))
    }

    pub fn zero_or_more(&self, rule: RuleRef<T>) -> RuleRef<T> {
        Arc::new(ZeroOrMore::new(rule))
    }

    pub fn one_or_more(&self, rule: RuleRef<T>) -> RuleRef<T> {
        Arc::new(OneOrMore::new(rule))
    }

    /// A literal token run.
    pub fn tokens(
        &self,
        expected: Vec<T>,
        equality: impl TokenEquality<T> + 'static,
    ) -> Result<RuleRef<T>> {
        Ok(self.decorate(Arc::new(LiteralSequence::new(expected, equality)?)))
    }

    pub fn range(
        &self,
        min: T,
        max: T,
        ordering: impl TokenOrdering<T> + 'static,
    ) -> Result<RuleRef<T>> {
        Ok(self.decorate(Arc::new(TokenRange::new(min, max, ordering)?)))
    }

    /// A late-bound reference to the rule registered as `name`.
    pub fn rule(&self, name: &str) -> Result<RuleRef<T>> {
        Ok(self.decorate(Arc::new(Reference::new(name)?)))
    }
}

impl<T: Token> Default for RuleFactory<T> {
    fn default() -> Self {
        RuleFactory::new(GlobalRules::All)
    }
}
