// SPDX-License-Identifier: Apache-2.0

use crate::config::DeserializerConfig;
use crate::cursor::Cursor;
use crate::escape_processor::{EscapeProcessor, SurrogateTracker};
use crate::json_number::{classify_primitive, is_token_char};
use crate::parse_error::{ErrorKind, ParseError};
use crate::value::{Map, Value};

/// Deserializes lenient JSON text into a [`Value`] tree.
///
/// Besides standard JSON this accepts single-quoted strings and member
/// names, and unquoted member names made of token characters. Input length,
/// nesting depth and map size are bounded by a [`DeserializerConfig`].
///
/// A `Deserializer` holds only its configuration; every call builds its own
/// cursor, so one instance may serve any number of threads.
///
/// Nesting is handled by native recursion. Depth limits far above the
/// default can exhaust the thread's stack on hostile input.
#[derive(Debug, Clone, Default)]
pub struct Deserializer {
    config: DeserializerConfig,
}

impl Deserializer {
    /// Creates a deserializer with the default limits.
    ///
    /// # Example
    /// ```
    /// use lenient_json::{Deserializer, Value};
    /// let value = Deserializer::new().deserialize("{name: 'value'}").unwrap();
    /// assert_eq!(value["name"], Value::from("value"));
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a deserializer with custom limits.
    pub fn with_config(config: DeserializerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeserializerConfig {
        &self.config
    }

    /// Parses exactly one value from `input`.
    ///
    /// Empty or all-whitespace input yields [`Value::Null`]. Anything but
    /// whitespace after the value is an [`ErrorKind::IllegalPrimitive`].
    pub fn deserialize(&self, input: &str) -> Result<Value, ParseError> {
        log::debug!(
            "deserialize: {} bytes, max length {}, max depth {}",
            input.len(),
            self.config.max_input_length(),
            self.config.max_recursion_depth()
        );
        let result = self.deserialize_document(input);
        if let Err(err) = &result {
            log::debug!("deserialize failed: {:?} at {:?}", err.kind(), err.offset());
        }
        result
    }

    /// Like [`Deserializer::deserialize`], but treats absent input as a
    /// caller error ([`ErrorKind::NullInput`]) rather than as empty text.
    pub fn deserialize_opt(&self, input: Option<&str>) -> Result<Value, ParseError> {
        match input {
            Some(text) => self.deserialize(text),
            None => Err(ErrorKind::NullInput.into()),
        }
    }

    fn deserialize_document(&self, input: &str) -> Result<Value, ParseError> {
        if exceeds_length(input, self.config.max_input_length()) {
            return Err(ErrorKind::InputTooLong.into());
        }

        let mut parser = ValueParser {
            cursor: Cursor::new(input),
            config: &self.config,
        };
        let value = parser.parse_value(0)?;

        if parser.cursor.peek_next_non_whitespace().is_some() {
            parser.cursor.step_back();
            return Err(ParseError::illegal_primitive(
                parser.cursor.remaining(),
                &parser.cursor,
            ));
        }
        Ok(value)
    }
}

/// True when `input` holds more than `max` characters.
fn exceeds_length(input: &str, max: usize) -> bool {
    // A string is never shorter in bytes than in characters
    input.len() > max && input.chars().nth(max).is_some()
}

/// Recursive-descent state for a single call.
struct ValueParser<'a, 'c> {
    cursor: Cursor<'a>,
    config: &'c DeserializerConfig,
}

impl<'a> ValueParser<'a, '_> {
    fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError::at(kind, &self.cursor)
    }

    /// `depth` is the nesting of the caller; this call sits one level below it.
    fn parse_value(&mut self, depth: usize) -> Result<Value, ParseError> {
        let depth = depth.saturating_add(1);
        if depth > self.config.max_recursion_depth() {
            return Err(self.error(ErrorKind::DepthExceeded));
        }

        let Some(next) = self.cursor.peek_next_non_whitespace() else {
            return Ok(Value::Null);
        };
        self.cursor.step_back();

        match next {
            '{' => self.parse_object(depth).map(Value::Map),
            '[' => self.parse_array(depth).map(Value::List),
            '"' | '\'' => self.parse_string().map(Value::String),
            _ => self.parse_primitive(),
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Vec<Value>, ParseError> {
        log::trace!("array at byte {}", self.cursor.position());
        if self.cursor.advance() != Some('[') {
            return Err(self.error(ErrorKind::InvalidArrayStart));
        }

        let mut list = Vec::new();
        let mut expect_more = false;
        let mut next = self.cursor.peek_next_non_whitespace();
        while let Some(c) = next {
            if c == ']' {
                break;
            }
            self.cursor.step_back();
            list.push(self.parse_value(depth)?);
            expect_more = false;

            next = self.cursor.peek_next_non_whitespace();
            if next == Some(']') {
                break;
            }
            if next != Some(',') {
                return Err(self.error(ErrorKind::ArrayExpectComma));
            }
            expect_more = true;
            next = self.cursor.peek_next_non_whitespace();
        }

        if expect_more {
            return Err(self.error(ErrorKind::ArrayExtraComma));
        }
        if next != Some(']') {
            return Err(self.error(ErrorKind::InvalidArrayEnd));
        }
        Ok(list)
    }

    fn parse_object(&mut self, depth: usize) -> Result<Map, ParseError> {
        log::trace!("object at byte {}", self.cursor.position());
        if self.cursor.advance() != Some('{') {
            return Err(self.error(ErrorKind::ExpectedOpenBrace));
        }

        let mut map = Map::new();
        let mut next = self.cursor.peek_next_non_whitespace();
        if next == Some('}') {
            return Ok(map);
        }

        while let Some(c) = next {
            self.cursor.step_back();
            // '}' can only show up here right after a ','
            if c == ':' || c == '}' {
                return Err(self.error(ErrorKind::InvalidMemberName));
            }

            let name = self.parse_member_name()?;
            if self.cursor.peek_next_non_whitespace() != Some(':') {
                return Err(self.error(ErrorKind::InvalidObject));
            }

            if map.len() >= self.config.max_members() {
                return Err(ParseError::too_many_members(
                    self.config.max_members(),
                    &self.cursor,
                ));
            }
            let value = self.parse_value(depth)?;
            map.insert(name, value);

            match self.cursor.peek_next_non_whitespace() {
                Some('}') => return Ok(map),
                Some(',') => next = self.cursor.peek_next_non_whitespace(),
                _ => return Err(self.error(ErrorKind::InvalidObject)),
            }
        }

        Err(self.error(ErrorKind::InvalidObject))
    }

    /// Quoted names are strings; anything else is read as a bare token.
    fn parse_member_name(&mut self) -> Result<String, ParseError> {
        match self.cursor.peek_next_non_whitespace() {
            Some('"' | '\'') => {
                self.cursor.step_back();
                self.parse_string()
            }
            Some(_) => {
                self.cursor.step_back();
                Ok(self.parse_primitive_token().to_string())
            }
            None => Ok(String::new()),
        }
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        log::trace!("string at byte {}", self.cursor.position());
        let quote = match self.cursor.advance() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.error(ErrorKind::StringNotQuoted)),
        };

        let mut text = String::new();
        let mut surrogates = SurrogateTracker::new();
        let mut escaped = false;

        while let Some(c) = self.cursor.advance() {
            if escaped {
                escaped = false;
                if c == 'u' {
                    let unit = self
                        .cursor
                        .advance_by(4)
                        .and_then(EscapeProcessor::parse_code_unit)
                        .ok_or_else(|| self.error(ErrorKind::BadEscape))?;
                    let decoded = surrogates
                        .push_code_unit(unit)
                        .map_err(|_| self.error(ErrorKind::InvalidString))?;
                    if let Some(ch) = decoded {
                        text.push(ch);
                    }
                    continue;
                }
                if surrogates.has_pending_high_surrogate() {
                    return Err(self.error(ErrorKind::InvalidString));
                }
                let ch = EscapeProcessor::process_simple_escape(c)
                    .ok_or_else(|| self.error(ErrorKind::BadEscape))?;
                text.push(ch);
                continue;
            }

            if c == '\\' {
                escaped = true;
                continue;
            }
            if surrogates.has_pending_high_surrogate() {
                return Err(self.error(ErrorKind::InvalidString));
            }
            if c == quote {
                return Ok(text);
            }
            text.push(c);
        }

        Err(self.error(ErrorKind::UnterminatedString))
    }

    /// Consumes the longest run of token characters, possibly empty.
    fn parse_primitive_token(&mut self) -> &'a str {
        let start = self.cursor.position();
        while let Some(c) = self.cursor.advance() {
            if !is_token_char(c) {
                self.cursor.step_back();
                break;
            }
        }
        self.cursor.since(start)
    }

    fn parse_primitive(&mut self) -> Result<Value, ParseError> {
        log::trace!("primitive at byte {}", self.cursor.position());
        let token = self.parse_primitive_token();
        classify_primitive(token).ok_or_else(|| ParseError::illegal_primitive(token, &self.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn parse(input: &str) -> Result<Value, ParseError> {
        Deserializer::new().deserialize(input)
    }

    fn parse_err(input: &str) -> ErrorKind {
        match parse(input) {
            Err(err) => err.kind(),
            Ok(value) => panic!("Expected error for {:?}, got: {:?}", input, value),
        }
    }

    #[test]
    fn test_dispatch_on_first_character() {
        assert!(parse(" {} ").unwrap().is_map());
        assert!(parse("\n[]").unwrap().is_list());
        assert!(parse("'s'").unwrap().is_string());
        assert!(parse("\"s\"").unwrap().is_string());
        assert!(parse("12").unwrap().is_number());
        assert!(parse("null").unwrap().is_null());
    }

    #[test]
    fn test_blank_input_is_null() {
        assert_eq!(parse(""), Ok(Value::Null));
        assert_eq!(parse(" \t\r\n "), Ok(Value::Null));
    }

    #[test]
    fn test_depth_counts_every_value() {
        let config = DeserializerConfig::new(1024, 1).unwrap();
        let deserializer = Deserializer::with_config(config);
        assert_eq!(deserializer.deserialize("1"), Ok(Value::Int32(1)));
        assert_eq!(deserializer.deserialize("[]"), Ok(Value::List(vec![])));
        assert_eq!(deserializer.deserialize("{}"), Ok(Value::Map(Map::new())));
        assert_eq!(
            deserializer.deserialize("[1]").unwrap_err().kind(),
            ErrorKind::DepthExceeded
        );
        assert_eq!(
            deserializer.deserialize("{a:1}").unwrap_err().kind(),
            ErrorKind::DepthExceeded
        );
    }

    #[test]
    fn test_array_comma_handling() {
        assert_eq!(parse_err("[1,2,]"), ErrorKind::ArrayExtraComma);
        assert_eq!(parse_err("[1,"), ErrorKind::ArrayExtraComma);
        assert_eq!(parse_err("[1 2]"), ErrorKind::ArrayExpectComma);
        assert_eq!(parse_err("[1"), ErrorKind::ArrayExpectComma);
        assert_eq!(parse_err("["), ErrorKind::InvalidArrayEnd);
        assert_eq!(parse_err("[,1]"), ErrorKind::IllegalPrimitive);
        assert_eq!(parse_err("[1,,2]"), ErrorKind::IllegalPrimitive);
    }

    #[test]
    fn test_object_grammar_errors() {
        assert_eq!(parse_err("{:1}"), ErrorKind::InvalidMemberName);
        assert_eq!(parse_err("{\"a\":1,}"), ErrorKind::InvalidMemberName);
        assert_eq!(parse_err("{\"a\" 1}"), ErrorKind::InvalidObject);
        assert_eq!(parse_err("{\"a\":1 \"b\":2}"), ErrorKind::InvalidObject);
        assert_eq!(parse_err("{\"a\":1"), ErrorKind::InvalidObject);
        assert_eq!(parse_err("{\"a\":1,"), ErrorKind::InvalidObject);
        assert_eq!(parse_err("{"), ErrorKind::InvalidObject);
        assert_eq!(parse_err("{,}"), ErrorKind::InvalidObject);
        assert_eq!(parse_err("{\"a\":}"), ErrorKind::IllegalPrimitive);
    }

    #[test]
    fn test_member_value_missing_at_end() {
        // The value reads as null at end of input, then the object is unclosed
        assert_eq!(parse_err("{\"a\":"), ErrorKind::InvalidObject);
    }

    #[test]
    fn test_member_cap() {
        let config = DeserializerConfig::default().with_max_members(2).unwrap();
        let deserializer = Deserializer::with_config(config);
        assert!(deserializer.deserialize("{a:1,b:2}").is_ok());

        let err = deserializer.deserialize("{a:1,b:2,c:3}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TooManyMembers);
        assert!(err.message().contains("'2'"));

        // Overwriting a duplicate does not grow the map
        let value = deserializer.deserialize("{a:1,a:2,a:3}").unwrap();
        assert_eq!(value.as_map().map(Map::len), Some(1));
        assert_eq!(value["a"], Value::Int32(3));
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            parse(r#""a\"b\'c\/d\\e\bf\fg\nh\ri\tj""#),
            Ok(Value::from("a\"b'c/d\\e\u{8}f\u{c}g\nh\ri\tj"))
        );
        assert_eq!(parse(r#"'it\'s'"#), Ok(Value::from("it's")));
        assert_eq!(parse(r#"'say "hi"'"#), Ok(Value::from("say \"hi\"")));
        assert_eq!(parse(r#""é中""#), Ok(Value::from("é中")));
    }

    #[test]
    fn test_string_errors() {
        assert_eq!(parse_err(r#""\x""#), ErrorKind::BadEscape);
        assert_eq!(parse_err(r#""\u12""#), ErrorKind::BadEscape);
        assert_eq!(parse_err(r#""\u12"#), ErrorKind::BadEscape);
        assert_eq!(parse_err(r#""\uZZZZ""#), ErrorKind::BadEscape);
        assert_eq!(parse_err(r#""abc"#), ErrorKind::UnterminatedString);
        assert_eq!(parse_err(r#"'abc""#), ErrorKind::UnterminatedString);
        assert_eq!(parse_err(r#""abc\"#), ErrorKind::UnterminatedString);
    }

    #[test]
    fn test_surrogates() {
        assert_eq!(parse(r#""\ud83d\ude00""#), Ok(Value::from("😀")));
        assert_eq!(parse_err(r#""\ud83d""#), ErrorKind::InvalidString);
        assert_eq!(parse_err(r#""\ud83dx""#), ErrorKind::InvalidString);
        assert_eq!(parse_err(r#""\ud83d\n""#), ErrorKind::InvalidString);
        assert_eq!(parse_err(r#""\ude00""#), ErrorKind::InvalidString);
        assert_eq!(parse_err(r#""\ud83d\u0041""#), ErrorKind::InvalidString);
    }

    #[test]
    fn test_trailing_content() {
        let err = parse("[1] x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalPrimitive);
        assert_eq!(err.message(), "Invalid JSON primitive: x.");

        assert_eq!(parse_err("{} {}"), ErrorKind::IllegalPrimitive);
        assert_eq!(parse_err("\"a\"\"b\""), ErrorKind::IllegalPrimitive);
        assert_eq!(parse("[1]  \n"), Ok(Value::from(vec![Value::Int32(1)])));
    }

    #[test]
    fn test_input_length_in_characters() {
        let config = DeserializerConfig::new(3, 10).unwrap();
        let deserializer = Deserializer::with_config(config);
        // Three characters, four bytes
        assert_eq!(deserializer.deserialize("'é'"), Ok(Value::from("é")));
        assert_eq!(
            deserializer.deserialize("1234").unwrap_err().kind(),
            ErrorKind::InputTooLong
        );
        assert!(!exceeds_length("ééé", 3));
        assert!(exceeds_length("éééé", 3));
    }

    #[test]
    fn test_error_offset_points_into_input() {
        let err = parse("[1,2,]").unwrap_err();
        assert_eq!(err.offset(), Some(6));
        assert_eq!(
            err.to_string(),
            "Invalid array passed in, extra trailing ','. (6): [1,2,]"
        );
    }

    #[test]
    fn test_deserialize_opt() {
        let deserializer = Deserializer::new();
        assert_eq!(
            deserializer.deserialize_opt(None).unwrap_err().kind(),
            ErrorKind::NullInput
        );
        assert_eq!(deserializer.deserialize_opt(Some("")), Ok(Value::Null));
        assert_eq!(deserializer.deserialize_opt(Some("7")), Ok(Value::Int32(7)));
    }
}
