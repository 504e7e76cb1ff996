use std::sync::Arc;

use bramble_core::{Grammar, ParseOptions, Parser, Result};
use tracing::debug;

use crate::stream::CharStream;
use crate::tree::TextTree;

/// Parses text against a character grammar.
#[derive(Debug)]
pub struct TextParser {
    parser: Parser<char>,
}

impl TextParser {
    pub fn new(grammar: impl Into<Arc<Grammar<char>>>) -> Self {
        TextParser {
            parser: Parser::new(grammar),
        }
    }

    /// Build the parser from a grammar definition.
    pub fn define(define: impl FnOnce() -> Result<Grammar<char>>) -> Result<Self> {
        Ok(TextParser::new(define()?))
    }

    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.parser = self.parser.with_options(options);
        self
    }

    pub fn grammar(&self) -> &Arc<Grammar<char>> {
        self.parser.grammar()
    }

    /// Parse `input` as `entry_rule`. See [`Parser::parse`].
    pub fn parse(&self, input: &str, entry_rule: &str) -> Result<Option<TextTree>> {
        let stream = CharStream::new(input);
        let chars = Arc::clone(stream.chars());
        debug!(entry_rule, chars = chars.len(), "parsing text");
        let tree = self.parser.parse(stream, entry_rule)?;
        Ok(tree.map(|tree| TextTree::new(tree, chars)))
    }

    /// Every surviving interpretation of `input`.
    pub fn parse_all(&self, input: &str, entry_rule: &str) -> Result<Vec<TextTree>> {
        let stream = CharStream::new(input);
        let chars = Arc::clone(stream.chars());
        let trees = self.parser.parse_all(stream, entry_rule)?;
        Ok(trees
            .into_iter()
            .map(|tree| TextTree::new(tree, Arc::clone(&chars)))
            .collect())
    }
}
