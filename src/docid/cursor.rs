//! Character cursor over a documentation-comment ID.
//!
//! The [`IdCursor`] is the text counterpart of a byte-stream parser: it keeps a position into
//! the ID and hands out the next character without ever failing. Reading past the end yields
//! the NUL sentinel `'\0'`, so grammar code branches on a single `match` over [`IdCursor::peek`]
//! instead of checking bounds.
//!
//! The cursor is `Copy`. Backtracking to retry a candidate, e.g. when several overloads of a
//! method are tried against the same parameter list, is a plain copy of a saved cursor.
//!
//! # Examples
//!
//! ```rust
//! use docscope::docid::IdCursor;
//!
//! let mut cursor = IdCursor::new("M:F");
//! assert_eq!(cursor.peek(), 'M');
//! assert!(cursor.starts_with("M:"));
//!
//! let saved = cursor;
//! cursor.advance();
//! assert!(cursor.eat(':'));
//! assert_eq!(cursor.rest(), "F");
//!
//! cursor.advance();
//! assert!(cursor.is_at_end());
//! assert_eq!(cursor.peek(), '\0');
//!
//! cursor = saved;
//! assert_eq!(cursor.pos(), 0);
//! ```

/// A position inside a documentation-comment ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdCursor<'a> {
    /// The ID being parsed
    input: &'a str,
    /// Byte offset of the next character
    position: usize,
}

impl<'a> IdCursor<'a> {
    /// Create a new cursor at the start of `input`
    ///
    /// ## Arguments
    /// * 'input' - The ID to parse
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        IdCursor { input, position: 0 }
    }

    /// The complete ID
    #[must_use]
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Byte offset of the next character
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// The unread part of the ID
    #[must_use]
    pub fn rest(&self) -> &'a str {
        self.input.get(self.position..).unwrap_or_default()
    }

    /// True once every character has been consumed
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// The next character, `'\0'` at the end of the ID
    #[must_use]
    pub fn peek(&self) -> char {
        self.rest().chars().next().unwrap_or('\0')
    }

    /// True if the unread part starts with `prefix`
    ///
    /// ## Arguments
    /// * 'prefix' - The text to look for
    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Move past the next character, does nothing at the end of the ID
    pub fn advance(&mut self) {
        self.position += self.peek_len();
    }

    /// Consume the next character if it is `expected`
    ///
    /// ## Arguments
    /// * 'expected' - The character to consume
    pub fn eat(&mut self, expected: char) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters up to (not including) the first one matching `stop`, and return them
    ///
    /// ## Arguments
    /// * 'stop' - Predicate selecting the terminating character
    pub fn take_until(&mut self, stop: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let length = rest.find(stop).unwrap_or(rest.len());
        self.position += length;
        &rest[..length]
    }

    /// Byte length of the next character
    fn peek_len(&self) -> usize {
        self.rest().chars().next().map_or(0, char::len_utf8)
    }
}
