//! The rule abstraction and the matching protocol every rule goes through.
//!
//! A rule's own logic lives in [`Rule::match_body`]. Callers never invoke it
//! directly; they go through [`match_rule`], which applies the left-recursion
//! guard and records non-atomic matches in each surviving branch's tree.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bramble_stack::{ensure_sufficient_stack, remaining_stack};
use tracing::trace;

use crate::branch::Branch;
use crate::token::Token;
use crate::Result;

/// Identity of one rule instance.
///
/// The recursion guard keys on identity, never on name: two separately
/// constructed rules with equal names and bodies are tracked independently.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(u64);

impl RuleId {
    /// A process-unique id.
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        RuleId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Surviving branches after a match. Empty means no match.
pub type Branches<T> = Vec<Branch<T>>;

pub type MatchResult<T> = Result<Branches<T>>;

pub type RuleRef<T> = Arc<dyn Rule<T>>;

/// A matcher over tokens of type `T`.
pub trait Rule<T>: Send + Sync {
    fn id(&self) -> RuleId;

    /// Display name, also the key under which a grammar registers the rule.
    fn name(&self) -> &str;

    /// Atomic rules are not recorded as parse tree nodes.
    fn is_atomic(&self) -> bool {
        false
    }

    /// Rule-specific matching. Use [`match_rule`] to invoke a rule.
    fn match_body(&self, branch: Branch<T>) -> MatchResult<T>;

    /// The wrapped rule, for decorators that an enclosing alternation
    /// already applies once.
    fn undecorated(&self) -> Option<&RuleRef<T>> {
        None
    }

    /// Grammar-notation rendering used by `Display`.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<T: Token> fmt::Display for dyn Rule<T> + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe(f)
    }
}

impl<T: Token> fmt::Debug for dyn Rule<T> + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name(), self.id().0)
    }
}

/// Match `rule` against `branch`.
///
/// 1. Prune the branch if `rule` was already entered twice at the current
///    position, otherwise count this entrance.
/// 2. Open a tree node unless the rule is atomic.
/// 3. Run the rule's own logic.
/// 4. In every survivor, close the node at the survivor's position and undo
///    the entrance if no token was consumed.
pub fn match_rule<T: Token>(rule: &dyn Rule<T>, mut branch: Branch<T>) -> MatchResult<T> {
    ensure_sufficient_stack(|| {
        let id = rule.id();
        let start = branch.position();

        if !branch.enter_rule(id) {
            trace!(
                branch = branch.id(),
                rule = rule.name(),
                position = start,
                "left recursion guard pruned branch"
            );
            return Ok(Vec::new());
        }

        let atomic = rule.is_atomic();
        if !atomic {
            branch.tree_mut().open(Arc::from(rule.name()), start);
        }
        trace!(
            branch = branch.id(),
            rule = rule.name(),
            position = start,
            depth = branch.tree_depth(),
            stack = ?remaining_stack(),
            "enter"
        );

        let mut survivors = rule.match_body(branch)?;

        for survivor in &mut survivors {
            if !atomic {
                let end = survivor.position();
                let reconciled = survivor.tree_mut().close(end);
                trace!(
                    branch = survivor.id(),
                    rule = rule.name(),
                    end,
                    ?reconciled,
                    "closed node"
                );
            }
            survivor.leave_rule(id, start);
        }

        trace!(
            rule = rule.name(),
            position = start,
            survivors = survivors.len(),
            "exit"
        );
        Ok(survivors)
    })
}

#[cfg(test)]
mod tests;
