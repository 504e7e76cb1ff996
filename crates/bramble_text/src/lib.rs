//! Character-level grammars.
//!
//! Text is parsed one `char` at a time: every terminal matches characters,
//! and whitespace skipping is expressed as a global rule rather than a lexer
//! pass.
//!
//! ```text
//! let sum = Production::define("Sum", GlobalRules::All, |rules| {
//!     rules.sequence(vec![rules.rule("Num")?, rules.literal("+")?, rules.rule("Num")?])
//! })?;
//! let grammar = Grammar::new()
//!     .with_rule(sum.into_rule(), false)
//!     .with_rule(number, false)
//!     .with_rule(whitespace(), true);
//! let tree = TextParser::new(grammar).parse("1 + 2", "Sum")?;
//! ```

mod parser;
mod rules;
mod stream;
mod tree;

pub use parser::TextParser;
pub use rules::{whitespace, CaseInsensitive, TextRules, WHITESPACE};
pub use stream::{printable, CharStream, END_OF_INPUT};
pub use tree::{leaf_images, walk_children, TextNode, TextTree, TextWalker};
