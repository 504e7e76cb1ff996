//! Stack headroom for rule matching.
//!
//! `bramble_core` matches a rule by calling into its sub-rules, so the depth
//! of the native stack follows the nesting of the grammar and the length of
//! right-recursive input. Matches also run on rayon workers, whose stacks are
//! fixed when the pool starts.
//!
//! [`ensure_sufficient_stack`] is called once per rule entry. When less than
//! [`RED_ZONE`] bytes remain it continues on a fresh [`SEGMENT_SIZE`] segment
//! allocated by `stacker`. On `wasm32` the closure runs directly and
//! [`remaining_stack`] reports nothing.

/// Remaining stack below which a new segment is allocated (128KB).
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
///
/// A single rule frame is small, but one segment has to hold the whole
/// chain of combinator frames between two protocol entries.
pub const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] remains.
///
/// ```text
/// fn match_rule(rule: &dyn Rule<T>, branch: Branch<T>) -> MatchResult<T> {
///     ensure_sufficient_stack(|| {
///         // guard, open node, delegate to sub-rules, reconcile
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Remaining stack space in bytes, when the platform can report it.
///
/// Used in trace output to spot grammars that recurse unexpectedly deep.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
