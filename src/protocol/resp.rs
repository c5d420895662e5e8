//! RESP parser and encoder
//!
//! Implements parsing from bytes to RespValue and encoding from RespValue to bytes.
//!
//! The parser works on a cursor (`&mut &[u8]`) over the unconsumed input. A successful
//! parse advances the cursor past exactly one frame; a failed parse leaves it untouched,
//! so the caller can buffer more bytes and retry the identical call.

use super::types::{ParseError, RespValue};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::str::FromStr;

const CRLF: &[u8] = b"\r\n";

/// Deepest array nesting accepted in one frame
pub const MAX_NESTING: usize = 128;

/// Largest frame a peer may announce, in bytes
pub const MAX_FRAME_SIZE: usize = 64 * 1024 * 1024;

/// Smallest encoding of an array element: type byte plus CRLF
const MIN_ELEMENT_SIZE: usize = 3;

/// A type-specific parser. Receives the input starting at the type byte and the
/// nesting depth of the value being parsed.
type ParseFn = fn(&mut &[u8], usize) -> Result<RespValue, ParseError>;

/// Parsers indexed by the leading type byte
static PARSERS: [Option<ParseFn>; 256] = build_parser_table();

const fn build_parser_table() -> [Option<ParseFn>; 256] {
    let mut table: [Option<ParseFn>; 256] = [None; 256];
    table[b'+' as usize] = Some(parse_simple_string as ParseFn);
    table[b'-' as usize] = Some(parse_simple_error as ParseFn);
    table[b'$' as usize] = Some(parse_bulk_string as ParseFn);
    table[b':' as usize] = Some(parse_integer as ParseFn);
    table[b'*' as usize] = Some(parse_array as ParseFn);
    table
}

/// Parse one RESP value from the front of `input`
///
/// On success `input` is advanced past the frame. On any error it is left unchanged.
pub fn parse(input: &mut &[u8]) -> Result<RespValue, ParseError> {
    parse_at(input, 0)
}

fn parse_at(input: &mut &[u8], depth: usize) -> Result<RespValue, ParseError> {
    let Some(&type_byte) = input.first() else {
        return Err(ParseError::Incomplete);
    };

    match PARSERS[type_byte as usize] {
        Some(parser) => parser(input, depth),
        None => Err(ParseError::Unsupported),
    }
}

/// Parse one RESP value from a growable read buffer
///
/// Returns Ok(Some(value)) if a complete value was parsed (and consumed),
/// Ok(None) if more data is needed,
/// Err(e) if the stream is invalid or unsupported
pub fn parse_frame(buf: &mut BytesMut) -> Result<Option<RespValue>, ParseError> {
    let mut cursor: &[u8] = &buf[..];
    let available = cursor.len();

    match parse(&mut cursor) {
        Ok(value) => {
            let consumed = available - cursor.len();
            buf.advance(consumed);
            Ok(Some(value))
        }
        Err(ParseError::Incomplete) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Parse simple string: +OK\r\n
fn parse_simple_string(input: &mut &[u8], _depth: usize) -> Result<RespValue, ParseError> {
    let (line, rest) = read_line(*input, b'+')?;
    let text = std::str::from_utf8(line).map_err(|_| ParseError::Invalid)?;
    *input = rest;
    Ok(RespValue::SimpleString(text.to_owned()))
}

/// Parse error: -Error message\r\n
fn parse_simple_error(input: &mut &[u8], _depth: usize) -> Result<RespValue, ParseError> {
    let (line, rest) = read_line(*input, b'-')?;
    let text = std::str::from_utf8(line).map_err(|_| ParseError::Invalid)?;
    *input = rest;
    Ok(RespValue::SimpleError(text.to_owned()))
}

/// Parse integer: :1000\r\n, :-5\r\n, :+5\r\n
fn parse_integer(input: &mut &[u8], _depth: usize) -> Result<RespValue, ParseError> {
    let (line, rest) = read_line(*input, b':')?;
    let i = parse_decimal::<i64>(line)?;
    *input = rest;
    Ok(RespValue::Integer(i))
}

/// Parse bulk string: $6\r\nfoobar\r\n
///
/// The payload is binary-safe: the trailing CRLF is found from the declared length,
/// never by scanning the payload.
fn parse_bulk_string(input: &mut &[u8], _depth: usize) -> Result<RespValue, ParseError> {
    let (header, rest) = read_line(*input, b'$')?;
    let length = parse_decimal::<usize>(header)?;
    if length > MAX_FRAME_SIZE {
        return Err(ParseError::Invalid);
    }
    let frame_len = length.checked_add(CRLF.len()).ok_or(ParseError::Invalid)?;

    if rest.len() < frame_len {
        return Err(ParseError::Incomplete);
    }

    let (payload, tail) = rest.split_at(length);
    if &tail[..CRLF.len()] != CRLF {
        return Err(ParseError::Invalid);
    }

    *input = &tail[CRLF.len()..];
    Ok(RespValue::BulkString {
        value: Bytes::copy_from_slice(payload),
        length,
    })
}

/// Parse array: *2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n
///
/// Elements are parsed from a local cursor, so nothing is consumed unless every
/// element is complete. A failing element fails the whole array with its own error.
/// Arrays nested deeper than [`MAX_NESTING`] are invalid.
fn parse_array(input: &mut &[u8], depth: usize) -> Result<RespValue, ParseError> {
    if depth >= MAX_NESTING {
        return Err(ParseError::Invalid);
    }

    let (header, mut rest) = read_line(*input, b'*')?;
    let count = parse_decimal::<usize>(header)?;
    if count > MAX_FRAME_SIZE / MIN_ELEMENT_SIZE {
        return Err(ParseError::Invalid);
    }

    let mut elements = Vec::with_capacity(count.min(rest.len() / MIN_ELEMENT_SIZE));
    for _ in 0..count {
        elements.push(parse_at(&mut rest, depth + 1)?);
    }

    *input = rest;
    Ok(RespValue::Array(elements))
}

/// Split `<sigil><line>\r\n<rest>` into (line, rest) without touching the cursor
fn read_line(input: &[u8], sigil: u8) -> Result<(&[u8], &[u8]), ParseError> {
    match input.first() {
        None => return Err(ParseError::Incomplete),
        Some(&b) if b != sigil => return Err(ParseError::Invalid),
        Some(_) => {}
    }

    let body = &input[1..];
    let end = body
        .windows(CRLF.len())
        .position(|window| window == CRLF)
        .ok_or(ParseError::Incomplete)?;

    Ok((&body[..end], &body[end + CRLF.len()..]))
}

/// Parse the whole line as a number; leftover characters make it invalid
fn parse_decimal<T: FromStr>(line: &[u8]) -> Result<T, ParseError> {
    std::str::from_utf8(line)
        .map_err(|_| ParseError::Invalid)?
        .parse::<T>()
        .map_err(|_| ParseError::Invalid)
}

/// Encode a RESP value to bytes
pub fn serialize(value: &RespValue) -> Bytes {
    let mut buf = BytesMut::new();
    encode_to(&mut buf, value);
    buf.freeze()
}

/// Encode a RESP value into an existing buffer
pub fn encode_to(buf: &mut BytesMut, value: &RespValue) {
    match value {
        RespValue::SimpleString(s) => {
            buf.put_u8(b'+');
            buf.put_slice(s.as_bytes());
            buf.put_slice(CRLF);
        }
        RespValue::SimpleError(e) => {
            buf.put_u8(b'-');
            buf.put_slice(e.as_bytes());
            buf.put_slice(CRLF);
        }
        RespValue::BulkString { value, length } => {
            buf.put_u8(b'$');
            buf.put_slice(length.to_string().as_bytes());
            buf.put_slice(CRLF);
            buf.put_slice(value);
            buf.put_slice(CRLF);
        }
        RespValue::Integer(i) => {
            buf.put_u8(b':');
            buf.put_slice(i.to_string().as_bytes());
            buf.put_slice(CRLF);
        }
        RespValue::Array(arr) => {
            buf.put_u8(b'*');
            buf.put_slice(arr.len().to_string().as_bytes());
            buf.put_slice(CRLF);
            for elem in arr {
                encode_to(buf, elem);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(bytes: &[u8]) -> (Result<RespValue, ParseError>, usize) {
        let mut cursor = bytes;
        let result = parse(&mut cursor);
        (result, cursor.len())
    }

    #[test]
    fn test_parse_simple_string() {
        let (result, remaining) = parse_all(b"+OK\r\n");
        assert_eq!(result, Ok(RespValue::SimpleString("OK".to_string())));
        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_parse_empty_simple_string() {
        let (result, _) = parse_all(b"+\r\n");
        assert_eq!(result, Ok(RespValue::SimpleString(String::new())));
    }

    #[test]
    fn test_parse_simple_error() {
        let (result, _) = parse_all(b"-Error message\r\n");
        assert_eq!(result, Ok(RespValue::SimpleError("Error message".to_string())));
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_all(b":1000\r\n").0, Ok(RespValue::Integer(1000)));
        assert_eq!(parse_all(b":-42\r\n").0, Ok(RespValue::Integer(-42)));
        assert_eq!(parse_all(b":+7\r\n").0, Ok(RespValue::Integer(7)));
    }

    #[test]
    fn test_parse_integer_with_trailing_garbage_is_invalid() {
        assert_eq!(parse_all(b":12a\r\n").0, Err(ParseError::Invalid));
        assert_eq!(parse_all(b":\r\n").0, Err(ParseError::Invalid));
    }

    #[test]
    fn test_parse_bulk_string() {
        let (result, remaining) = parse_all(b"$5\r\nhello\r\n");
        assert_eq!(
            result,
            Ok(RespValue::BulkString { value: Bytes::from("hello"), length: 5 })
        );
        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_parse_bulk_string_is_binary_safe() {
        let (result, _) = parse_all(b"$6\r\na\r\nb\r\n\r\n");
        assert_eq!(result, Ok(RespValue::bulk_string("a\r\nb\r\n")));
    }

    #[test]
    fn test_parse_empty_bulk_string() {
        let (result, _) = parse_all(b"$0\r\n\r\n");
        assert_eq!(result, Ok(RespValue::bulk_string("")));
    }

    #[test]
    fn test_parse_bulk_string_bad_terminator_is_invalid() {
        assert_eq!(parse_all(b"$3\r\nfooXY").0, Err(ParseError::Invalid));
    }

    #[test]
    fn test_parse_bulk_string_negative_length_is_invalid() {
        assert_eq!(parse_all(b"$-1\r\n").0, Err(ParseError::Invalid));
    }

    #[test]
    fn test_parse_array() {
        let (result, _) = parse_all(b"*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n");
        assert_eq!(
            result,
            Ok(RespValue::Array(vec![
                RespValue::bulk_string("foo"),
                RespValue::bulk_string("bar"),
            ]))
        );
    }

    #[test]
    fn test_parse_empty_array_consumes_only_header() {
        let (result, remaining) = parse_all(b"*0\r\n+OK\r\n");
        assert_eq!(result, Ok(RespValue::Array(vec![])));
        assert_eq!(remaining, 5);
    }

    #[test]
    fn test_parse_nested_array() {
        let (result, _) = parse_all(b"*2\r\n:1\r\n*2\r\n+a\r\n-b\r\n");
        assert_eq!(
            result,
            Ok(RespValue::Array(vec![
                RespValue::Integer(1),
                RespValue::Array(vec![
                    RespValue::simple_string("a"),
                    RespValue::simple_error("b"),
                ]),
            ]))
        );
    }

    #[test]
    fn test_parse_array_propagates_child_error() {
        assert_eq!(parse_all(b"*2\r\n:1\r\n:x\r\n").0, Err(ParseError::Invalid));
        assert_eq!(parse_all(b"*2\r\n:1\r\n!x\r\n").0, Err(ParseError::Unsupported));
        assert_eq!(parse_all(b"*2\r\n:1\r\n").0, Err(ParseError::Incomplete));
    }

    #[test]
    fn test_parse_unsupported_type_byte() {
        assert_eq!(parse_all(b"%1\r\n").0, Err(ParseError::Unsupported));
        assert_eq!(parse_all(b"PING\r\n").0, Err(ParseError::Unsupported));
    }

    #[test]
    fn test_parse_incomplete_inputs() {
        let inputs: [&[u8]; 8] = [
            b"",
            b"+OK",
            b"+OK\r",
            b"$5\r\nhel",
            b"$5\r\nhello",
            b"$5",
            b"*1\r\n",
            b"*2\r\n$3\r\nfoo\r\n",
        ];
        for input in inputs {
            assert_eq!(parse_all(input).0, Err(ParseError::Incomplete), "{:?}", input);
        }
    }

    #[test]
    fn test_parse_failure_leaves_cursor_untouched() {
        let inputs: [&[u8]; 4] = [
            b"*2\r\n$3\r\nfoo\r\n",
            b":12a\r\n",
            b"?\r\n",
            b"*2\r\n+ok\r\n:bad\r\n",
        ];
        for input in inputs {
            let mut cursor = input;
            assert!(parse(&mut cursor).is_err());
            assert_eq!(cursor, input);
        }
    }

    #[test]
    fn test_parse_nesting_limit() {
        let mut nested = b"*1\r\n".repeat(MAX_NESTING - 1);
        nested.extend_from_slice(b":1\r\n");
        assert!(parse_all(&nested).0.is_ok());

        let too_deep = b"*1\r\n".repeat(200_000);
        let mut cursor = &too_deep[..];
        assert_eq!(parse(&mut cursor), Err(ParseError::Invalid));
        assert_eq!(cursor.len(), too_deep.len());
    }

    #[test]
    fn test_parse_oversized_headers_are_invalid() {
        let inputs: [&[u8]; 3] = [
            b"$4294967295\r\n",
            b"*100000000\r\n",
            b"*1\r\n$999999999\r\n",
        ];
        for input in inputs {
            let mut cursor = input;
            assert_eq!(parse(&mut cursor), Err(ParseError::Invalid), "{:?}", input);
            assert_eq!(cursor, input);
        }
    }

    #[test]
    fn test_parse_back_to_back_frames() {
        let input = b"+OK\r\n:5\r\n$3\r\nabc\r\n";
        let mut cursor = &input[..];
        assert_eq!(parse(&mut cursor), Ok(RespValue::simple_string("OK")));
        assert_eq!(parse(&mut cursor), Ok(RespValue::Integer(5)));
        assert_eq!(parse(&mut cursor), Ok(RespValue::bulk_string("abc")));
        assert!(cursor.is_empty());
        assert_eq!(parse(&mut cursor), Err(ParseError::Incomplete));
    }

    #[test]
    fn test_parse_frame_consumes_only_complete_frames() {
        let mut buf = BytesMut::from("*1\r\n$4\r\nPI");
        assert_eq!(parse_frame(&mut buf), Ok(None));
        assert_eq!(buf.len(), 10);

        buf.extend_from_slice(b"NG\r\n+extra");
        assert_eq!(
            parse_frame(&mut buf),
            Ok(Some(RespValue::array(vec![RespValue::bulk_string("PING")])))
        );
        assert_eq!(&buf[..], b"+extra");
    }

    #[test]
    fn test_parse_frame_reports_invalid() {
        let mut buf = BytesMut::from(":nope\r\n");
        assert_eq!(parse_frame(&mut buf), Err(ParseError::Invalid));
        assert_eq!(&buf[..], b":nope\r\n");
    }

    #[test]
    fn test_encode_simple_string() {
        let encoded = serialize(&RespValue::simple_string("OK"));
        assert_eq!(encoded, Bytes::from("+OK\r\n"));
    }

    #[test]
    fn test_encode_simple_error() {
        let encoded = serialize(&RespValue::simple_error("ERR boom"));
        assert_eq!(encoded, Bytes::from("-ERR boom\r\n"));
    }

    #[test]
    fn test_encode_bulk_string() {
        let encoded = serialize(&RespValue::bulk_string("foobar"));
        assert_eq!(encoded, Bytes::from("$6\r\nfoobar\r\n"));
    }

    #[test]
    fn test_encode_bulk_string_uses_declared_length() {
        let value = RespValue::BulkString { value: Bytes::from("abc"), length: 9 };
        assert_eq!(serialize(&value), Bytes::from("$9\r\nabc\r\n"));
    }

    #[test]
    fn test_encode_integers() {
        assert_eq!(serialize(&RespValue::Integer(42)), Bytes::from(":42\r\n"));
        assert_eq!(serialize(&RespValue::Integer(-42)), Bytes::from(":-42\r\n"));
    }

    #[test]
    fn test_encode_array() {
        let value = RespValue::array(vec![
            RespValue::bulk_string("PING"),
            RespValue::Array(vec![]),
        ]);
        assert_eq!(serialize(&value), Bytes::from("*2\r\n$4\r\nPING\r\n*0\r\n"));
    }

    #[test]
    fn test_parse_inverts_serialize() {
        let value = RespValue::array(vec![
            RespValue::simple_string("OK"),
            RespValue::simple_error("ERR nope"),
            RespValue::bulk_string("line\r\nbreak"),
            RespValue::Integer(i64::MIN),
            RespValue::Integer(i64::MAX),
            RespValue::array(vec![RespValue::bulk_string(""), RespValue::array(vec![])]),
        ]);

        let encoded = serialize(&value);
        let mut cursor = &encoded[..];
        assert_eq!(parse(&mut cursor), Ok(value));
        assert!(cursor.is_empty());
    }
}
