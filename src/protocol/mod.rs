//! RESP protocol implementation
//!
//! This module handles parsing and encoding of the Redis Serialization Protocol (RESP).
//! It is completely independent from other modules (loose coupling).

mod types;
mod resp;

pub use types::{RespValue, ParseError};
pub use resp::{parse, parse_frame, serialize, encode_to, MAX_FRAME_SIZE, MAX_NESTING};
