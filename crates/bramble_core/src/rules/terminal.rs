//! Rules that consume tokens directly.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::branch::Branch;
use crate::rule::{MatchResult, Rule, RuleId};
use crate::token::{Token, TokenEquality, TokenOrdering};
use crate::{Error, Result};

/// A fixed run of tokens, compared under a caller-supplied equality.
pub struct LiteralSequence<T> {
    id: RuleId,
    expected: Vec<T>,
    equality: Arc<dyn TokenEquality<T>>,
}

impl<T: Token> LiteralSequence<T> {
    pub fn new(expected: Vec<T>, equality: impl TokenEquality<T> + 'static) -> Result<Self> {
        Self::with_shared(expected, Arc::new(equality))
    }

    pub fn with_shared(expected: Vec<T>, equality: Arc<dyn TokenEquality<T>>) -> Result<Self> {
        if expected.is_empty() {
            return Err(Error::invalid_argument("a literal needs at least one token"));
        }
        Ok(LiteralSequence {
            id: RuleId::fresh(),
            expected,
            equality,
        })
    }

    pub fn expected(&self) -> &[T] {
        &self.expected
    }
}

impl<T: Token> Rule<T> for LiteralSequence<T> {
    fn id(&self) -> RuleId {
        self.id
    }

    fn name(&self) -> &str {
        "Literal"
    }

    fn is_atomic(&self) -> bool {
        true
    }

    fn match_body(&self, mut branch: Branch<T>) -> MatchResult<T> {
        for expected in &self.expected {
            if branch.is_at_end() || !self.equality.tokens_equal(expected, branch.current()) {
                return Ok(Vec::new());
            }
            branch.advance()?;
        }
        Ok(vec![branch])
    }

    /// A single token renders as itself, several as a bracketed list.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expected.as_slice() {
            [token] => write!(f, "{token:?}"),
            tokens => f.debug_list().entries(tokens).finish(),
        }
    }
}

/// One token inside an inclusive range.
pub struct TokenRange<T> {
    id: RuleId,
    min: T,
    max: T,
    ordering: Arc<dyn TokenOrdering<T>>,
}

impl<T: Token> TokenRange<T> {
    pub fn new(min: T, max: T, ordering: impl TokenOrdering<T> + 'static) -> Result<Self> {
        if ordering.compare_tokens(&min, &max) == Ordering::Greater {
            return Err(Error::invalid_argument(format!(
                "token range {min:?}..{max:?} is inverted"
            )));
        }
        Ok(TokenRange {
            id: RuleId::fresh(),
            min,
            max,
            ordering: Arc::new(ordering),
        })
    }

    fn contains(&self, token: &T) -> bool {
        self.ordering.compare_tokens(&self.min, token) != Ordering::Greater
            && self.ordering.compare_tokens(token, &self.max) != Ordering::Greater
    }
}

impl<T: Token> Rule<T> for TokenRange<T> {
    fn id(&self) -> RuleId {
        self.id
    }

    fn name(&self) -> &str {
        "Range"
    }

    fn is_atomic(&self) -> bool {
        true
    }

    fn match_body(&self, mut branch: Branch<T>) -> MatchResult<T> {
        if branch.is_at_end() || !self.contains(branch.current()) {
            return Ok(Vec::new());
        }
        branch.advance()?;
        Ok(vec![branch])
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{:?}", self.min, self.max)
    }
}

type Matcher<T> = dyn Fn(&mut Branch<T>) -> Result<bool> + Send + Sync;

/// Leaf rule backed by a closure.
///
/// The closure consumes tokens through [`Branch::advance`] and reports
/// whether it matched. Terminals are recorded in the tree unless made
/// atomic.
pub struct Terminal<T> {
    id: RuleId,
    name: String,
    atomic: bool,
    matcher: Box<Matcher<T>>,
}

impl<T: Token> Terminal<T> {
    pub fn new(
        name: impl Into<String>,
        matcher: impl Fn(&mut Branch<T>) -> Result<bool> + Send + Sync + 'static,
    ) -> Self {
        Terminal {
            id: RuleId::fresh(),
            name: name.into(),
            atomic: false,
            matcher: Box::new(matcher),
        }
    }

    /// Keep matches of this terminal out of the tree.
    #[must_use]
    pub fn atomic(mut self) -> Self {
        self.atomic = true;
        self
    }
}

impl<T: Token> Rule<T> for Terminal<T> {
    fn id(&self) -> RuleId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_atomic(&self) -> bool {
        self.atomic
    }

    fn match_body(&self, mut branch: Branch<T>) -> MatchResult<T> {
        if (self.matcher)(&mut branch)? {
            Ok(vec![branch])
        } else {
            Ok(Vec::new())
        }
    }
}
