// SPDX-License-Identifier: Apache-2.0

/// A read position over an immutable input string.
///
/// The cursor never fails by itself: reads past the end return `None` and
/// leave the position untouched. Positions are byte indices that always sit
/// on a `char` boundary; diagnostics report the character offset instead.
#[derive(Debug)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Current byte position, usable with [`Cursor::since`].
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of characters consumed so far.
    pub fn offset(&self) -> usize {
        self.text
            .get(..self.pos)
            .map_or(0, |consumed| consumed.chars().count())
    }

    /// Skips whitespace and returns the first non-whitespace character.
    ///
    /// The returned character is consumed too; callers that only wanted to
    /// look at it must call [`Cursor::step_back`].
    pub fn peek_next_non_whitespace(&mut self) -> Option<char> {
        while let Some(c) = self.advance() {
            if !c.is_whitespace() {
                return Some(c);
            }
        }
        None
    }

    /// Consumes one character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.text.get(self.pos..)?.chars().next()?;
        self.pos = self.pos.saturating_add(c.len_utf8());
        Some(c)
    }

    /// Consumes exactly `count` characters, or nothing if fewer remain.
    pub fn advance_by(&mut self, count: usize) -> Option<&'a str> {
        let rest = self.text.get(self.pos..)?;
        let mut chars = rest.chars();
        let mut len = 0usize;
        for _ in 0..count {
            len = len.saturating_add(chars.next()?.len_utf8());
        }
        let taken = rest.get(..len)?;
        self.pos = self.pos.saturating_add(len);
        Some(taken)
    }

    /// Moves back by one character. No-op at the start of input.
    pub fn step_back(&mut self) {
        if let Some(prev) = self
            .text
            .get(..self.pos)
            .and_then(|consumed| consumed.chars().next_back())
        {
            self.pos = self.pos.saturating_sub(prev.len_utf8());
        }
    }

    /// The input consumed between `start` and the current position.
    pub fn since(&self, start: usize) -> &'a str {
        self.text.get(start..self.pos).unwrap_or_default()
    }

    /// The unread suffix of the input.
    pub fn remaining(&self) -> &'a str {
        self.text.get(self.pos..).unwrap_or_default()
    }

    /// Formats `template` together with the current offset and the full input.
    pub fn debug_string(&self, template: &str) -> String {
        format!("{} ({}): {}", template, self.offset(), self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_until_end() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.advance(), Some('b'));
        assert_eq!(cursor.position(), 2);

        // Reading past the end does not move the position
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.remaining(), "");
    }

    #[test]
    fn test_peek_consumes_whitespace_and_character() {
        let mut cursor = Cursor::new(" \t\n x");
        assert_eq!(cursor.peek_next_non_whitespace(), Some('x'));
        assert_eq!(cursor.offset(), 5);

        cursor.step_back();
        assert_eq!(cursor.offset(), 4);
        assert_eq!(cursor.remaining(), "x");
    }

    #[test]
    fn test_peek_on_blank_input() {
        let mut cursor = Cursor::new("   ");
        assert_eq!(cursor.peek_next_non_whitespace(), None);
        assert_eq!(cursor.offset(), 3);
    }

    #[test]
    fn test_step_back_saturates_at_start() {
        let mut cursor = Cursor::new("abc");
        cursor.step_back();
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.advance(), Some('a'));
    }

    #[test]
    fn test_advance_by_is_all_or_nothing() {
        let mut cursor = Cursor::new("00414");
        assert_eq!(cursor.advance_by(4), Some("0041"));
        assert_eq!(cursor.remaining(), "4");

        assert_eq!(cursor.advance_by(4), None);
        assert_eq!(cursor.remaining(), "4", "short read must not consume");

        assert_eq!(cursor.advance_by(0), Some(""));
    }

    #[test]
    fn test_multibyte_characters() {
        let mut cursor = Cursor::new("αβ γ");
        assert_eq!(cursor.advance(), Some('α'));
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.offset(), 1);

        assert_eq!(cursor.advance_by(2), Some("β "));
        cursor.step_back();
        cursor.step_back();
        assert_eq!(cursor.remaining(), "β γ");
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn test_since_slices_consumed_input() {
        let mut cursor = Cursor::new("true,");
        let start = cursor.position();
        for _ in 0..4 {
            cursor.advance();
        }
        assert_eq!(cursor.since(start), "true");
    }

    #[test]
    fn test_debug_string_embeds_offset_and_input() {
        let mut cursor = Cursor::new("[1,]");
        cursor.advance_by(3);
        assert_eq!(cursor.debug_string("Oops"), "Oops (3): [1,]");
    }
}
