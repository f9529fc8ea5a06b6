// SPDX-License-Identifier: Apache-2.0

//! A lenient JSON deserializer with bounded input length and nesting depth.
//!
//! ```
//! use lenient_json::{from_str, Value};
//!
//! let value = from_str("{ 'name': \"widget\", size: 12, ratio: 0.5, big: 1e3 }").unwrap();
//! assert_eq!(value["name"].as_str(), Some("widget"));
//! assert_eq!(value["size"], Value::Int32(12));
//! assert!(matches!(value["ratio"], Value::Decimal(_)));
//! assert_eq!(value["big"], Value::Float64(1000.0));
//! ```

mod config;
pub use config::DeserializerConfig;

mod cursor;

mod deserializer;
pub use deserializer::Deserializer;

mod escape_processor;

mod json_number;

mod parse_error;
pub use parse_error::{ErrorKind, ParseError};

mod value;
pub use value::{Map, Value};

pub use rust_decimal::Decimal;

/// Deserializes `input` with the default limits.
pub fn from_str(input: &str) -> Result<Value, ParseError> {
    Deserializer::new().deserialize(input)
}
