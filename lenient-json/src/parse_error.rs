// SPDX-License-Identifier: Apache-2.0

use crate::cursor::Cursor;

/// The category of a deserialization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No input was supplied at all.
    NullInput,
    /// The input is longer than the configured maximum length.
    InputTooLong,
    /// A configured limit was below 1.
    InvalidConfiguration,
    /// Nesting went deeper than the configured recursion limit.
    DepthExceeded,
    /// An array production did not start with `[`.
    InvalidArrayStart,
    /// An array was not closed with `]`.
    InvalidArrayEnd,
    /// An array element was followed by something other than `,` or `]`.
    ArrayExpectComma,
    /// An array had a `,` with no element after it.
    ArrayExtraComma,
    /// An object production did not start with `{`.
    ExpectedOpenBrace,
    /// A member name was expected but `:` or `}` was found.
    InvalidMemberName,
    /// Malformed object: missing `:`, missing `,`/`}`, or unclosed.
    InvalidObject,
    /// An object exceeded the configured member cap.
    TooManyMembers,
    /// A string production did not start with a quote.
    StringNotQuoted,
    /// End of input was reached inside a string.
    UnterminatedString,
    /// Unknown escape character or malformed `\u` escape.
    BadEscape,
    /// The decoded string contains an unpaired UTF-16 surrogate.
    InvalidString,
    /// A token is not `null`, `true`, `false` or a number, or content trails the value.
    IllegalPrimitive,
}

impl ErrorKind {
    /// Message template used when reporting this kind of error.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::NullInput => "Input must not be null.",
            ErrorKind::InputTooLong => "The length of the input exceeds the maximum length.",
            ErrorKind::InvalidConfiguration => "The value must be greater than or equal to 1.",
            ErrorKind::DepthExceeded => "RecursionLimit exceeded.",
            ErrorKind::InvalidArrayStart => "Invalid array passed in, '[' expected.",
            ErrorKind::InvalidArrayEnd => "Invalid array passed in, ']' expected.",
            ErrorKind::ArrayExpectComma => "Invalid array passed in, ',' expected.",
            ErrorKind::ArrayExtraComma => "Invalid array passed in, extra trailing ','.",
            ErrorKind::ExpectedOpenBrace => "Invalid object passed in, '{' expected.",
            ErrorKind::InvalidMemberName => "Invalid object passed in, member name expected.",
            ErrorKind::InvalidObject => "Invalid object passed in, ':' or '}' expected.",
            ErrorKind::TooManyMembers => {
                "The maximum number of items has already been deserialized into a single map."
            }
            ErrorKind::StringNotQuoted => "Invalid string passed in, '\"' expected.",
            ErrorKind::UnterminatedString => "Unterminated string passed in.",
            ErrorKind::BadEscape => "Unrecognized escape sequence.",
            ErrorKind::InvalidString => "Invalid string passed in, unpaired surrogate.",
            ErrorKind::IllegalPrimitive => "Invalid JSON primitive",
        }
    }
}

/// Error returned by every failing deserialization call.
///
/// The first violation aborts the call, so there is never a partial value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ErrorKind,
    offset: Option<usize>,
    message: String,
}

impl ParseError {
    /// An error that happened before any input was read.
    pub(crate) fn precondition(kind: ErrorKind) -> Self {
        Self {
            kind,
            offset: None,
            message: kind.message().to_string(),
        }
    }

    /// An error at the cursor's position, formatted with the full input.
    pub(crate) fn at(kind: ErrorKind, cursor: &Cursor<'_>) -> Self {
        Self {
            kind,
            offset: Some(cursor.offset()),
            message: cursor.debug_string(kind.message()),
        }
    }

    /// An illegal primitive, reported with the offending text.
    pub(crate) fn illegal_primitive(token: &str, cursor: &Cursor<'_>) -> Self {
        Self {
            kind: ErrorKind::IllegalPrimitive,
            offset: Some(cursor.offset()),
            message: format!("{}: {}.", ErrorKind::IllegalPrimitive.message(), token),
        }
    }

    /// Member cap hit; the message carries the cap.
    pub(crate) fn too_many_members(limit: usize, cursor: &Cursor<'_>) -> Self {
        Self {
            kind: ErrorKind::TooManyMembers,
            offset: Some(cursor.offset()),
            message: format!(
                "{} The value is '{}'.",
                ErrorKind::TooManyMembers.message(),
                limit
            ),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Character offset where the failure was detected, if input was read.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ErrorKind> for ParseError {
    fn from(kind: ErrorKind) -> Self {
        ParseError::precondition(kind)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}
