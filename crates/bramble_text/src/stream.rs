//! Character token source.

use std::fmt;
use std::sync::Arc;

use bramble_core::TokenSource;

/// Returned by [`CharStream`] once the input is exhausted.
pub const END_OF_INPUT: char = '\u{1A}';

/// Characters shown on either side of the cursor by `Display`.
const PREVIEW_RANGE: usize = 10;

/// Cursor over the characters of a text input.
///
/// Positions count characters, not bytes. Clones share the character
/// buffer.
#[derive(Clone, Debug)]
pub struct CharStream {
    chars: Arc<[char]>,
    position: usize,
}

impl CharStream {
    pub fn new(input: &str) -> Self {
        CharStream {
            chars: input.chars().collect(),
            position: 0,
        }
    }

    pub fn chars(&self) -> &Arc<[char]> {
        &self.chars
    }
}

impl TokenSource<char> for CharStream {
    fn position(&self) -> usize {
        self.position
    }

    fn current(&self) -> &char {
        self.chars.get(self.position).unwrap_or(&END_OF_INPUT)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    fn boxed_clone(&self) -> Box<dyn TokenSource<char>> {
        Box::new(self.clone())
    }
}

/// The cursor with up to ten characters of context on either side, e.g.
/// `...lo, wor[l]d`.
impl fmt::Display for CharStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.chars.len();
        let position = self.position.min(len);
        let before_start = position.saturating_sub(PREVIEW_RANGE);
        let after_start = (position + 1).min(len);
        let after_end = (after_start + PREVIEW_RANGE).min(len);

        let mut preview = String::new();
        if before_start > 0 {
            preview.push_str("...");
        }
        preview.extend(&self.chars[before_start..position]);
        match self.chars.get(position) {
            Some(current) => {
                preview.push('[');
                preview.push(*current);
                preview.push(']');
            }
            None => preview.push_str("[EOF]"),
        }
        preview.extend(&self.chars[after_start..after_end]);
        if after_end < len {
            preview.push_str("...");
        }
        f.write_str(&printable(&preview))
    }
}

/// `text` with line breaks and tabs flattened to spaces, carriage returns
/// dropped, and other control characters escaped as `\uXX`.
pub fn printable(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\r' => {}
            '\n' | '\t' => out.push(' '),
            c if c.is_control() => out.push_str(&format!("\\u{:02X}", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}
