// SPDX-License-Identifier: Apache-2.0

/// Pure helpers for the escape sequences accepted inside strings.
pub struct EscapeProcessor;

impl EscapeProcessor {
    /// Maps the character following a backslash to the character it stands for.
    ///
    /// Returns `None` for `u` (handled separately) and for unknown escapes.
    ///
    /// # Examples
    /// ```ignore
    /// // Internal API - see unit tests for usage examples
    /// assert_eq!(EscapeProcessor::process_simple_escape('n'), Some('\n'));
    /// ```
    pub fn process_simple_escape(escape_char: char) -> Option<char> {
        match escape_char {
            '"' | '\'' | '/' | '\\' => Some(escape_char),
            'b' => Some('\u{0008}'),
            'f' => Some('\u{000C}'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            _ => None,
        }
    }

    /// Parses the four hex digits of a `\uXXXX` escape into a UTF-16 code unit.
    pub fn parse_code_unit(hex: &str) -> Option<u16> {
        let mut unit = 0u16;
        let mut digits = 0usize;
        for c in hex.chars() {
            let digit = c.to_digit(16)?;
            unit = unit.checked_mul(16)?.checked_add(digit as u16)?;
            digits += 1;
        }
        (digits == 4).then_some(unit)
    }

    /// Check if a code unit is a high surrogate (0xD800-0xDBFF)
    pub fn is_high_surrogate(unit: u16) -> bool {
        (0xD800..=0xDBFF).contains(&unit)
    }

    /// Check if a code unit is a low surrogate (0xDC00-0xDFFF)
    pub fn is_low_surrogate(unit: u16) -> bool {
        (0xDC00..=0xDFFF).contains(&unit)
    }

    /// Combine a high and low surrogate pair into a single scalar value
    pub fn combine_surrogate_pair(high: u16, low: u16) -> Option<char> {
        if !Self::is_high_surrogate(high) || !Self::is_low_surrogate(low) {
            return None;
        }
        let high = u32::from(high & 0x3FF);
        let low = u32::from(low & 0x3FF);
        char::from_u32(0x10000 + (high << 10) + low)
    }
}

/// A code unit sequence that is not well-formed UTF-16.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurrogateError {
    /// A high surrogate was not followed by a low surrogate.
    UnpairedHigh,
    /// A low surrogate appeared without a preceding high surrogate.
    UnpairedLow,
}

/// Assembles `\u` code units into scalar values across consecutive escapes.
#[derive(Debug, Default)]
pub struct SurrogateTracker {
    pending_high_surrogate: Option<u16>,
}

impl SurrogateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one code unit.
    ///
    /// Returns `Ok(None)` while a high surrogate waits for its partner.
    pub fn push_code_unit(&mut self, unit: u16) -> Result<Option<char>, SurrogateError> {
        match self.pending_high_surrogate.take() {
            Some(high) => EscapeProcessor::combine_surrogate_pair(high, unit)
                .map(Some)
                .ok_or(SurrogateError::UnpairedHigh),
            None if EscapeProcessor::is_high_surrogate(unit) => {
                self.pending_high_surrogate = Some(unit);
                Ok(None)
            }
            None if EscapeProcessor::is_low_surrogate(unit) => Err(SurrogateError::UnpairedLow),
            None => char::from_u32(u32::from(unit))
                .map(Some)
                .ok_or(SurrogateError::UnpairedLow),
        }
    }

    /// Check if there's a pending high surrogate waiting for a low surrogate
    pub fn has_pending_high_surrogate(&self) -> bool {
        self.pending_high_surrogate.is_some()
    }
}
