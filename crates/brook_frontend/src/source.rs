//! Character-level cursor over the raw source text.

use std::str::Chars;

/// Returned by [`SourceCursor::read`] once the source is exhausted.
pub const END_OF_SOURCE: char = '\0';

pub struct SourceCursor<'a> {
    all: &'a str,
    chars: Chars<'a>,

    line: u32,
    pin_start: usize,
}

impl<'a> SourceCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            all: source,
            chars: source.chars(),

            line: 1,
            pin_start: 0,
        }
    }

    /// Consumes and returns the next character, bumping the line counter
    /// when a line terminator is consumed.
    pub fn read(&mut self) -> char {
        match self.chars.next() {
            Some(ch) => {
                if ch == '\n' {
                    self.line += 1;
                }
                ch
            }
            None => END_OF_SOURCE,
        }
    }

    /// Consumes the current character only if it equals `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.read();
            true
        } else {
            false
        }
    }

    /// Marks the current offset as the start of a lexeme window.
    pub fn pin(&mut self) {
        self.pin_start = self.byte_pos();
    }

    /// The substring from the last [`pin`](Self::pin) to the current offset.
    pub fn pinned(&self) -> &'a str {
        &self.all[self.pin_start..self.byte_pos()]
    }

    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while matches!(self.peek(), Some(ch) if predicate(ch)) {
            self.read();
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    pub fn peek_next(&self) -> Option<char> {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        lookahead.next()
    }

    pub fn at_end(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    /// 1-based line number of the current offset.
    pub fn line(&self) -> u32 {
        self.line
    }

    fn byte_pos(&self) -> usize {
        self.all.len() - self.chars.as_str().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_and_lines() {
        let mut cursor = SourceCursor::new("a\nb");
        assert_eq!(cursor.line(), 1);
        assert_eq!(cursor.read(), 'a');
        assert_eq!(cursor.read(), '\n');
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.read(), 'b');
        assert!(cursor.at_end());
        assert_eq!(cursor.read(), END_OF_SOURCE);
    }

    #[test]
    fn pinned_window() {
        let mut cursor = SourceCursor::new("abc def");
        cursor.read();
        cursor.pin();
        cursor.advance_while(|ch| ch.is_ascii_alphabetic());
        assert_eq!(cursor.pinned(), "bc");
    }

    #[test]
    fn eat_only_on_match() {
        let mut cursor = SourceCursor::new("->");
        assert_eq!(cursor.read(), '-');
        assert!(!cursor.eat('-'));
        assert!(cursor.eat('>'));
        assert!(cursor.at_end());
    }
}
