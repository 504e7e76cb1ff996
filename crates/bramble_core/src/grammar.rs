//! Named-rule registry.
//!
//! Normal and global rules live in separate namespaces. The ordered array of
//! global rules that interleaving walks on every decorated match is derived
//! lazily and cached; registering a global rule resets the cache.

use std::fmt;
use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::rule::RuleRef;
use crate::token::Token;
use crate::{Error, Result};

pub struct Grammar<T> {
    rules: FxHashMap<String, RuleRef<T>>,
    /// Global rules with their registration slot.
    globals: FxHashMap<String, (usize, RuleRef<T>)>,
    global_cache: OnceLock<Box<[RuleRef<T>]>>,
}

impl<T: Token> Grammar<T> {
    pub fn new() -> Self {
        Grammar {
            rules: FxHashMap::default(),
            globals: FxHashMap::default(),
            global_cache: OnceLock::new(),
        }
    }

    /// Register `rule` under its name, replacing any earlier rule of the same
    /// kind and name.
    pub fn add_rule(&mut self, rule: RuleRef<T>, is_global: bool) {
        let name = rule.name().to_owned();
        debug!(rule = %name, is_global, "registering rule");

        if is_global {
            let slot = self
                .globals
                .get(&name)
                .map_or(self.globals.len(), |(slot, _)| *slot);
            self.globals.insert(name, (slot, rule));
            self.global_cache.take();
        } else {
            self.rules.insert(name, rule);
        }
    }

    /// Builder form of [`Grammar::add_rule`].
    #[must_use]
    pub fn with_rule(mut self, rule: RuleRef<T>, is_global: bool) -> Self {
        self.add_rule(rule, is_global);
        self
    }

    /// Look up a rule by name, normal rules first.
    pub fn get_rule(&self, name: &str) -> Result<&RuleRef<T>> {
        self.rules
            .get(name)
            .or_else(|| self.globals.get(name).map(|(_, rule)| rule))
            .ok_or_else(|| Error::rule_not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name) || self.globals.contains_key(name)
    }

    /// Global rules in registration order.
    ///
    /// Built once on first access; concurrent readers all see the same
    /// array.
    pub fn global_rules(&self) -> &[RuleRef<T>] {
        self.global_cache.get_or_init(|| {
            let mut globals: Vec<_> = self.globals.values().collect();
            globals.sort_unstable_by_key(|(slot, _)| *slot);
            globals.into_iter().map(|(_, rule)| Arc::clone(rule)).collect()
        })
    }

    /// Number of registered rules of both kinds.
    pub fn len(&self) -> usize {
        self.rules.len() + self.globals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.globals.is_empty()
    }
}

impl<T: Token> Default for Grammar<T> {
    fn default() -> Self {
        Grammar::new()
    }
}

impl<T> fmt::Debug for Grammar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rules: Vec<_> = self.rules.keys().collect();
        rules.sort_unstable();
        let mut globals: Vec<_> = self.globals.iter().collect();
        globals.sort_unstable_by_key(|(_, (slot, _))| *slot);
        f.debug_struct("Grammar")
            .field("rules", &rules)
            .field(
                "globals",
                &globals.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
