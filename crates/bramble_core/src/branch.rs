//! Branches: one candidate interpretation of the input each.
//!
//! A branch owns everything that can diverge between interpretations: the
//! token cursor, the left-recursion guard table, and the open frames of its
//! parse tree. The grammar and parse options are shared read-only through
//! the parse session.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::grammar::Grammar;
use crate::options::ParseOptions;
use crate::rule::RuleId;
use crate::token::{Token, TokenSource};
use crate::tree::cursor::TreeCursor;
use crate::tree::ParseTree;
use crate::Result;

/// Id of the branch a parse starts from.
pub const ROOT_BRANCH_ID: &str = ".";

/// Entrances of one rule at one position beyond which the guard prunes.
pub(crate) const MAX_ENTRANCES: u8 = 2;

/// State shared by every branch of one top-level parse.
struct Session<T> {
    grammar: Arc<Grammar<T>>,
    options: ParseOptions,
    forks: AtomicU64,
}

pub struct Branch<T> {
    id: Arc<str>,
    session: Arc<Session<T>>,
    tokens: Box<dyn TokenSource<T>>,
    active_rules: FxHashMap<RuleId, u8>,
    tree: TreeCursor,
}

impl<T: Token> Branch<T> {
    /// Start a new branch family at the beginning of `tokens`.
    pub fn new(
        grammar: Arc<Grammar<T>>,
        tokens: Box<dyn TokenSource<T>>,
        options: ParseOptions,
    ) -> Self {
        Branch {
            id: Arc::from(ROOT_BRANCH_ID),
            session: Arc::new(Session {
                grammar,
                options,
                forks: AtomicU64::new(0),
            }),
            tokens,
            active_rules: FxHashMap::default(),
            tree: TreeCursor::default(),
        }
    }

    /// Hierarchical id, `"."` for the root and `parent/n` for forks.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn grammar(&self) -> &Grammar<T> {
        &self.session.grammar
    }

    pub(crate) fn shared_grammar(&self) -> Arc<Grammar<T>> {
        Arc::clone(&self.session.grammar)
    }

    pub fn options(&self) -> &ParseOptions {
        &self.session.options
    }

    pub fn position(&self) -> usize {
        self.tokens.position()
    }

    pub fn current(&self) -> &T {
        self.tokens.current()
    }

    pub fn is_at_end(&self) -> bool {
        self.tokens.is_at_end()
    }

    /// Consume the current token.
    ///
    /// Clears the left-recursion guard, since every entry recorded so far
    /// belongs to the previous position. At end of input nothing is consumed
    /// and the guard stays.
    pub fn advance(&mut self) -> Result<()> {
        self.session.options.check_cancelled()?;
        let before = self.tokens.position();
        self.tokens.advance();
        if self.tokens.position() != before {
            self.active_rules.clear();
        }
        Ok(())
    }

    /// Independent copy of this branch.
    pub fn fork(&self) -> Self {
        let n = self.session.forks.fetch_add(1, Ordering::Relaxed) + 1;
        Branch {
            id: Arc::from(format!("{}/{n}", self.id)),
            session: Arc::clone(&self.session),
            tokens: self.tokens.boxed_clone(),
            active_rules: self.active_rules.clone(),
            tree: self.tree.fork(),
        }
    }

    /// How often `rule` is currently entered at this position.
    pub fn entrance_count(&self, rule: RuleId) -> u8 {
        self.active_rules.get(&rule).copied().unwrap_or(0)
    }

    /// Record an entrance of `rule`, or refuse it once the guard is full.
    pub(crate) fn enter_rule(&mut self, rule: RuleId) -> bool {
        let count = self.active_rules.entry(rule).or_insert(0);
        if *count >= MAX_ENTRANCES {
            return false;
        }
        *count += 1;
        true
    }

    /// Undo an entrance recorded at `entry_position`.
    ///
    /// A branch that has since consumed tokens already dropped the entry.
    pub(crate) fn leave_rule(&mut self, rule: RuleId, entry_position: usize) {
        if self.position() != entry_position {
            return;
        }
        if let Some(count) = self.active_rules.get_mut(&rule) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.active_rules.remove(&rule);
            }
        }
    }

    pub(crate) fn tree_mut(&mut self) -> &mut TreeCursor {
        &mut self.tree
    }

    pub(crate) fn tree_depth(&self) -> usize {
        self.tree.depth()
    }

    /// The completed part of this branch's parse tree.
    pub fn tree(&self) -> ParseTree {
        self.tree.to_tree()
    }
}

impl<T> fmt::Debug for Branch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branch")
            .field("id", &self.id)
            .field("position", &self.tokens.position())
            .finish_non_exhaustive()
    }
}
