//! Caller-facing parse entry point.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::branch::Branch;
use crate::grammar::Grammar;
use crate::options::ParseOptions;
use crate::rule::{match_rule, Branches};
use crate::rules::{skip_globals, GlobalRules};
use crate::token::{Token, TokenSource};
use crate::tree::ParseTree;
use crate::{Error, Result};

/// Parses token streams against a frozen grammar.
///
/// The grammar is shared, so one parser can serve any number of parses,
/// including concurrent ones.
#[derive(Debug)]
pub struct Parser<T> {
    grammar: Arc<Grammar<T>>,
    options: ParseOptions,
}

impl<T: Token> Parser<T> {
    pub fn new(grammar: impl Into<Arc<Grammar<T>>>) -> Self {
        Parser {
            grammar: grammar.into(),
            options: ParseOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn grammar(&self) -> &Arc<Grammar<T>> {
        &self.grammar
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `tokens` as `entry_rule`.
    ///
    /// `Ok(None)` when no interpretation survives, the tree when exactly one
    /// does, and [`Error::AmbiguousParse`] when several do.
    pub fn parse(
        &self,
        tokens: impl TokenSource<T> + 'static,
        entry_rule: &str,
    ) -> Result<Option<ParseTree>> {
        let mut survivors = self.survivors(Box::new(tokens), entry_rule)?;
        match survivors.len() {
            0 => Ok(None),
            1 => Ok(survivors.pop().map(|branch| branch.tree())),
            branches => {
                warn!(rule = entry_rule, branches, "ambiguous parse");
                Err(Error::AmbiguousParse {
                    rule: entry_rule.to_owned(),
                    branches,
                })
            }
        }
    }

    /// Every surviving interpretation, in exploration order.
    pub fn parse_all(
        &self,
        tokens: impl TokenSource<T> + 'static,
        entry_rule: &str,
    ) -> Result<Vec<ParseTree>> {
        let survivors = self.survivors(Box::new(tokens), entry_rule)?;
        Ok(survivors.iter().map(Branch::tree).collect())
    }

    #[tracing::instrument(level = "debug", skip(self, tokens))]
    fn survivors(&self, tokens: Box<dyn TokenSource<T>>, entry_rule: &str) -> Result<Branches<T>> {
        let rule = Arc::clone(self.grammar.get_rule(entry_rule)?);
        self.options.check_cancelled()?;

        let branch = Branch::new(Arc::clone(&self.grammar), tokens, self.options.clone());
        let mut survivors = match_rule(rule.as_ref(), branch)?;
        self.options.check_cancelled()?;

        let matched = survivors.len();
        if self.options.require_end_of_input {
            survivors = complete(survivors)?;
        }
        debug!(matched, complete = survivors.len(), "entry rule finished");
        Ok(survivors)
    }
}

/// Survivors that reach the end of input, allowing trailing global rules.
///
/// The skipped tail is not part of the returned tree.
fn complete<T: Token>(survivors: Branches<T>) -> Result<Branches<T>> {
    let mut complete = Vec::with_capacity(survivors.len());
    for branch in survivors {
        if branch.is_at_end()
            || skip_globals(branch.fork(), &GlobalRules::All)?
                .iter()
                .any(Branch::is_at_end)
        {
            complete.push(branch);
        }
    }
    Ok(complete)
}

#[cfg(test)]
mod tests;
