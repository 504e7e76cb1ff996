//! Character rules.

use std::sync::Arc;

use bramble_core::rules::{RuleFactory, Terminal};
use bramble_core::token::{Exact, Natural, TokenEquality};
use bramble_core::{Branch, Result, RuleRef};

/// Name under which [`whitespace`] registers.
pub const WHITESPACE: &str = "Whitespace";

/// Case-insensitive character equality.
#[derive(Copy, Clone, Debug, Default)]
pub struct CaseInsensitive;

impl TokenEquality<char> for CaseInsensitive {
    fn tokens_equal(&self, expected: &char, actual: &char) -> bool {
        expected == actual || expected.to_lowercase().eq(actual.to_lowercase())
    }
}

/// Text shorthands for [`RuleFactory<char>`].
pub trait TextRules {
    /// Case-insensitive literal.
    fn literal(&self, text: &str) -> Result<RuleRef<char>>;

    /// Case-sensitive literal.
    fn literal_exact(&self, text: &str) -> Result<RuleRef<char>>;

    /// One character in `min..=max`.
    fn char_range(&self, min: char, max: char) -> Result<RuleRef<char>>;
}

impl TextRules for RuleFactory<char> {
    fn literal(&self, text: &str) -> Result<RuleRef<char>> {
        self.tokens(text.chars().collect(), CaseInsensitive)
    }

    fn literal_exact(&self, text: &str) -> Result<RuleRef<char>> {
        self.tokens(text.chars().collect(), Exact)
    }

    fn char_range(&self, min: char, max: char) -> Result<RuleRef<char>> {
        self.range(min, max, Natural)
    }
}

/// Atomic terminal consuming a run of spaces, tabs and line breaks.
///
/// Meant to be registered as a global rule.
pub fn whitespace() -> RuleRef<char> {
    Arc::new(Terminal::new(WHITESPACE, skip_whitespace).atomic())
}

fn skip_whitespace(branch: &mut Branch<char>) -> Result<bool> {
    let mut matched = false;
    while !branch.is_at_end() && matches!(branch.current(), ' ' | '\t' | '\n' | '\r') {
        branch.advance()?;
        matched = true;
    }
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_equality() {
        assert!(CaseInsensitive.tokens_equal(&'a', &'A'));
        assert!(CaseInsensitive.tokens_equal(&'Ä', &'ä'));
        assert!(!CaseInsensitive.tokens_equal(&'a', &'b'));
    }
}
