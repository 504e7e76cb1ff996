//! Token sources and token comparers.
//!
//! The engine is generic over the token type. A token source is a cursor
//! over shared backing data; cloning it yields an independent cursor, which
//! is how every branch gets its own read position.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Bound satisfied by every token type the engine can match.
pub trait Token: Clone + fmt::Debug + Send + Sync + 'static {}

impl<T: Clone + fmt::Debug + Send + Sync + 'static> Token for T {}

/// Cursor over a token stream.
///
/// `current` returns an end-of-input sentinel once the cursor has passed the
/// last token. The sentinel must lie outside the normal token domain, and
/// terminals check [`TokenSource::is_at_end`] before comparing against it.
pub trait TokenSource<T>: Send + Sync {
    /// Offset of the current token from the start of the stream.
    fn position(&self) -> usize;

    /// The token under the cursor, or the end-of-input sentinel.
    fn current(&self) -> &T;

    fn is_at_end(&self) -> bool;

    /// Move past the current token. Has no effect at end of input.
    fn advance(&mut self);

    /// Independent cursor over the same backing data.
    fn boxed_clone(&self) -> Box<dyn TokenSource<T>>;
}

impl<T> Clone for Box<dyn TokenSource<T>> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

/// Token source over an already-lexed token sequence.
///
/// Clones share the backing slice.
#[derive(Clone, Debug)]
pub struct SliceSource<T> {
    tokens: Arc<[T]>,
    end: T,
    position: usize,
}

impl<T: Token> SliceSource<T> {
    /// Create a source over `tokens`; `end` is returned by `current` once
    /// every token has been consumed.
    pub fn new(tokens: impl Into<Arc<[T]>>, end: T) -> Self {
        SliceSource {
            tokens: tokens.into(),
            end,
            position: 0,
        }
    }

    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }
}

impl<T: Token> TokenSource<T> for SliceSource<T> {
    fn position(&self) -> usize {
        self.position
    }

    fn current(&self) -> &T {
        self.tokens.get(self.position).unwrap_or(&self.end)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    fn boxed_clone(&self) -> Box<dyn TokenSource<T>> {
        Box::new(self.clone())
    }
}

/// Equality notion used by literal-sequence terminals.
pub trait TokenEquality<T>: Send + Sync {
    fn tokens_equal(&self, expected: &T, actual: &T) -> bool;
}

/// Ordering notion used by token-range terminals.
pub trait TokenOrdering<T>: Send + Sync {
    fn compare_tokens(&self, left: &T, right: &T) -> Ordering;
}

/// Equality through [`PartialEq`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Exact;

impl<T: PartialEq> TokenEquality<T> for Exact {
    fn tokens_equal(&self, expected: &T, actual: &T) -> bool {
        expected == actual
    }
}

/// Ordering through [`Ord`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Natural;

impl<T: Ord> TokenOrdering<T> for Natural {
    fn compare_tokens(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

impl<T, F> TokenEquality<T> for F
where
    F: Fn(&T, &T) -> bool + Send + Sync,
{
    fn tokens_equal(&self, expected: &T, actual: &T) -> bool {
        self(expected, actual)
    }
}

/// Adapter for ordering closures; a bare closure impl would overlap with the
/// equality one for two-argument `Fn`s.
pub struct OrderBy<F>(pub F);

impl<T, F> TokenOrdering<T> for OrderBy<F>
where
    F: Fn(&T, &T) -> Ordering + Send + Sync,
{
    fn compare_tokens(&self, left: &T, right: &T) -> Ordering {
        (self.0)(left, right)
    }
}
