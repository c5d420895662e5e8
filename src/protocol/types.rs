//! RESP value types
//!
//! Defines the core data types for the RESP protocol

use bytes::Bytes;
use std::fmt;
use thiserror::Error;

/// RESP value types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespValue {
    /// Simple strings: +OK\r\n
    SimpleString(String),

    /// Errors: -Error message\r\n
    SimpleError(String),

    /// Bulk strings: $6\r\nfoobar\r\n
    ///
    /// `length` is the declared length read from (or written to) the wire.
    BulkString { value: Bytes, length: usize },

    /// Integers: :1000\r\n
    Integer(i64),

    /// Arrays: *2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n
    Array(Vec<RespValue>),
}

impl RespValue {
    /// Create a simple string
    pub fn simple_string(s: impl Into<String>) -> Self {
        RespValue::SimpleString(s.into())
    }

    /// Create an error
    pub fn simple_error(s: impl Into<String>) -> Self {
        RespValue::SimpleError(s.into())
    }

    /// Create a bulk string whose declared length matches its payload
    pub fn bulk_string(b: impl Into<Bytes>) -> Self {
        let value = b.into();
        let length = value.len();
        RespValue::BulkString { value, length }
    }

    /// Create an integer
    pub fn integer(i: i64) -> Self {
        RespValue::Integer(i)
    }

    /// Create an array
    pub fn array(v: Vec<RespValue>) -> Self {
        RespValue::Array(v)
    }

    /// Check if this is a bulk string
    pub fn is_bulk_string(&self) -> bool {
        matches!(self, RespValue::BulkString { .. })
    }

    /// Try to extract array elements
    pub fn as_array(&self) -> Option<&[RespValue]> {
        match self {
            RespValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to extract bulk string bytes
    pub fn as_bulk_bytes(&self) -> Option<&Bytes> {
        match self {
            RespValue::BulkString { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Try to view a bulk string payload as UTF-8 text
    pub fn as_bulk_str(&self) -> Option<&str> {
        self.as_bulk_bytes()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

impl fmt::Display for RespValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RespValue::SimpleString(s) => write!(f, "SimpleString({})", s),
            RespValue::SimpleError(e) => write!(f, "SimpleError({})", e),
            RespValue::BulkString { length, .. } => write!(f, "BulkString({} bytes)", length),
            RespValue::Integer(i) => write!(f, "Integer({})", i),
            RespValue::Array(arr) => write!(f, "Array({} elements)", arr.len()),
        }
    }
}

/// RESP parsing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// More bytes are needed before a full frame is available
    #[error("incomplete frame")]
    Incomplete,

    /// The bytes violate the grammar of the frame type
    #[error("invalid frame")]
    Invalid,

    /// The leading type byte has no parser
    #[error("unsupported frame type")]
    Unsupported,
}
