#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use pretty_assertions::assert_eq;

use super::*;
use crate::rules::Terminal;
use crate::test_support::{branch, positions};

/// Re-enters itself at the same position until the guard intervenes,
/// recording its entrance count on every call.
struct SelfNesting {
    id: RuleId,
    seen: Mutex<Vec<u8>>,
}

impl SelfNesting {
    fn new() -> Self {
        SelfNesting {
            id: RuleId::fresh(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Rule<char> for SelfNesting {
    fn id(&self) -> RuleId {
        self.id
    }

    fn name(&self) -> &str {
        "SelfNesting"
    }

    fn match_body(&self, branch: Branch<char>) -> MatchResult<char> {
        self.seen.lock().unwrap().push(branch.entrance_count(self.id));
        let mut nested = match_rule(self, branch.fork())?;
        nested.push(branch);
        Ok(nested)
    }
}

/// Consumes one token and then re-enters itself.
struct EatThenRecurse {
    id: RuleId,
    calls: AtomicUsize,
}

impl Rule<char> for EatThenRecurse {
    fn id(&self) -> RuleId {
        self.id
    }

    fn name(&self) -> &str {
        "EatThenRecurse"
    }

    fn is_atomic(&self) -> bool {
        true
    }

    fn match_body(&self, mut branch: Branch<char>) -> MatchResult<char> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if branch.is_at_end() {
            return Ok(vec![branch]);
        }
        branch.advance()?;
        match_rule(self, branch)
    }
}

/// Advances without looking for the end of input, then re-enters itself.
struct AdvanceThenRecurse {
    id: RuleId,
    calls: AtomicUsize,
}

impl Rule<char> for AdvanceThenRecurse {
    fn id(&self) -> RuleId {
        self.id
    }

    fn name(&self) -> &str {
        "AdvanceThenRecurse"
    }

    fn match_body(&self, mut branch: Branch<char>) -> MatchResult<char> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        branch.advance()?;
        match_rule(self, branch)
    }
}

#[test]
fn third_entrance_at_one_position_is_pruned() {
    let rule = SelfNesting::new();
    let survivors = match_rule(&rule, branch("")).unwrap();

    // Two bodies ran; the third entrance never reached the body.
    assert_eq!(*rule.seen.lock().unwrap(), vec![1, 2]);
    assert_eq!(survivors.len(), 2);
}

#[test]
fn guard_resets_after_consuming_a_token() {
    let rule = EatThenRecurse {
        id: RuleId::fresh(),
        calls: AtomicUsize::new(0),
    };
    let survivors = match_rule(&rule, branch("aaaa")).unwrap();

    assert_eq!(positions(&survivors), vec![4]);
    assert_eq!(rule.calls.load(Ordering::SeqCst), 5);
    assert_eq!(survivors[0].entrance_count(rule.id), 0);
}

#[test]
fn advancing_at_end_of_input_keeps_the_guard() {
    let rule = AdvanceThenRecurse {
        id: RuleId::fresh(),
        calls: AtomicUsize::new(0),
    };
    let survivors = match_rule(&rule, branch("a")).unwrap();

    // One call consumes 'a', two more run at the end, the next is pruned.
    assert!(survivors.is_empty());
    assert_eq!(rule.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn entrance_is_released_when_the_rule_returns() {
    let rule = Terminal::new("Empty", |_: &mut Branch<char>| Ok(true));
    let survivors = match_rule(&rule, branch("a")).unwrap();
    assert_eq!(survivors[0].entrance_count(rule.id()), 0);
}

#[test]
fn atomic_rules_add_no_node() {
    let eat = |branch: &mut Branch<char>| -> crate::Result<bool> {
        branch.advance()?;
        Ok(true)
    };

    let atomic = Terminal::new("Letter", eat).atomic();
    let survivors = match_rule(&atomic, branch("a")).unwrap();
    assert!(survivors[0].tree().is_empty());

    let failing = Terminal::new("Nothing", |_: &mut Branch<char>| Ok(false)).atomic();
    assert!(match_rule(&failing, branch("a")).unwrap().is_empty());

    let recorded = Terminal::new("Letter", eat);
    let survivors = match_rule(&recorded, branch("a")).unwrap();
    let tree = survivors[0].tree();
    let spans: Vec<_> = tree.iter().map(|n| (n.rule_name(), n.span())).collect();
    assert_eq!(spans, vec![("Letter", 0..1)]);
}

#[test]
fn rule_ids_are_distinct() {
    let a = Terminal::new("Same", |_: &mut Branch<char>| Ok(true));
    let b = Terminal::new("Same", |_: &mut Branch<char>| Ok(true));
    assert_ne!(a.id(), b.id());
}
