// SPDX-License-Identifier: Apache-2.0

//! Limits applied to every deserialization call.

use crate::parse_error::{ErrorKind, ParseError};

/// Validated limits for a [`Deserializer`](crate::Deserializer).
///
/// Every limit is at least 1; the constructors reject anything smaller with
/// [`ErrorKind::InvalidConfiguration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeserializerConfig {
    max_input_length: usize,
    max_recursion_depth: usize,
    max_members: usize,
}

impl DeserializerConfig {
    /// Default maximum input length, in characters.
    pub const DEFAULT_MAX_INPUT_LENGTH: usize = 2_097_152;
    /// Default maximum nesting depth.
    pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 100;
    /// Default member cap per map, effectively unbounded.
    pub const DEFAULT_MAX_MEMBERS: usize = usize::MAX;

    /// Creates a configuration with the given length and depth limits.
    ///
    /// # Example
    /// ```
    /// use lenient_json::{DeserializerConfig, ErrorKind};
    /// let config = DeserializerConfig::new(1024, 8).unwrap();
    /// assert_eq!(config.max_recursion_depth(), 8);
    ///
    /// let err = DeserializerConfig::new(0, 8).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    /// ```
    pub fn new(max_input_length: usize, max_recursion_depth: usize) -> Result<Self, ParseError> {
        Self::default()
            .with_max_input_length(max_input_length)?
            .with_max_recursion_depth(max_recursion_depth)
    }

    pub fn with_max_input_length(mut self, limit: usize) -> Result<Self, ParseError> {
        self.max_input_length = validate(limit)?;
        Ok(self)
    }

    pub fn with_max_recursion_depth(mut self, limit: usize) -> Result<Self, ParseError> {
        self.max_recursion_depth = validate(limit)?;
        Ok(self)
    }

    /// Caps the number of members a single map may hold.
    pub fn with_max_members(mut self, limit: usize) -> Result<Self, ParseError> {
        self.max_members = validate(limit)?;
        Ok(self)
    }

    pub fn max_input_length(&self) -> usize {
        self.max_input_length
    }

    pub fn max_recursion_depth(&self) -> usize {
        self.max_recursion_depth
    }

    pub fn max_members(&self) -> usize {
        self.max_members
    }
}

impl Default for DeserializerConfig {
    fn default() -> Self {
        Self {
            max_input_length: Self::DEFAULT_MAX_INPUT_LENGTH,
            max_recursion_depth: Self::DEFAULT_MAX_RECURSION_DEPTH,
            max_members: Self::DEFAULT_MAX_MEMBERS,
        }
    }
}

fn validate(limit: usize) -> Result<usize, ParseError> {
    if limit < 1 {
        return Err(ErrorKind::InvalidConfiguration.into());
    }
    Ok(limit)
}
