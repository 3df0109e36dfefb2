//! RESP Command Decoder
//!
//! Requests arrive as arrays of bulk strings:
//!
//! ```text
//! *2\r\n$4\r\nECHO\r\n$5\r\nhello\r\n   ->   ["ECHO", "hello"]
//! ```
//!
//! The decoder is line-oriented: it splits the input on CRLF and takes the
//! line following every `$<len>` header as one token. The declared length is
//! not checked against the token, so a token can never contain CRLF.
//!
//! Anything that is not an array (simple strings, errors, stray bytes) decodes
//! to an empty token list, which the dispatcher treats as "no command".
//!
//! ## Streams
//!
//! TCP delivers bytes, not frames. [`next_frame`] walks a connection buffer
//! with the same line rules and reports how many bytes make up the next unit
//! to decode, so a frame split across reads waits for its tail and several
//! frames in one read are decoded one at a time. Stray bytes that arrive
//! without a line break are cut off where the next `*` begins, so they cannot
//! swallow the header of the frame that follows.

use crate::protocol::types::prefix;

/// Longest unterminated `*<count>` header still treated as a frame in progress.
const MAX_HEADER_LEN: usize = 32;

/// Decodes one command frame into its tokens.
///
/// Never fails: input that is empty, not an array, or an array without any
/// bulk string yields an empty vector. Invalid UTF-8 is replaced lossily.
///
/// # Example
///
/// ```
/// use tinykv::protocol::decode;
///
/// assert_eq!(decode(b"*1\r\n$4\r\nPING\r\n"), vec!["PING"]);
/// assert!(decode(b"+OK\r\n").is_empty());
/// ```
pub fn decode(buf: &[u8]) -> Vec<String> {
    let lossy = String::from_utf8_lossy(buf);

    // The piece after a final CRLF is not a line
    let text: &str = lossy.strip_suffix("\r\n").unwrap_or(&lossy);

    let mut lines = text.split("\r\n");
    match lines.next() {
        Some(first) if first.as_bytes().first() == Some(&prefix::ARRAY) => {}
        _ => return Vec::new(),
    }

    let mut tokens = Vec::new();
    while let Some(line) = lines.next() {
        if line.as_bytes().first() == Some(&prefix::BULK_STRING) {
            if let Some(token) = lines.next() {
                tokens.push(token.to_string());
            }
        }
    }

    tokens
}

/// Returns the length of the next decodable unit at the front of `buf`, or
/// `None` if the buffer does not hold a complete one yet.
///
/// - `*<n>\r\n` followed by `n` elements, where an element is a `$` line plus
///   the line after it, or any other single line.
/// - An array header whose count is not a non-negative integer is a unit on
///   its own.
/// - Anything not starting with `*` is a single line, cut short at the
///   first `*` if that comes before the line's CRLF.
pub fn next_frame(buf: &[u8]) -> Option<usize> {
    if *buf.first()? != prefix::ARRAY {
        return stray_len(buf);
    }

    let header_end = find_crlf(buf)?;
    let mut consumed = header_end + 2;

    let count = match parse_count(&buf[1..header_end]) {
        Some(n) => n,
        None => return Some(consumed),
    };

    for _ in 0..count {
        let line_end = consumed + find_crlf(&buf[consumed..])?;
        let is_bulk = buf[consumed] == prefix::BULK_STRING;
        consumed = line_end + 2;

        if is_bulk {
            let data_end = consumed + find_crlf(&buf[consumed..])?;
            consumed = data_end + 2;
        }
    }

    Some(consumed)
}

/// Whether `buf` starts like an array frame whose tail has not arrived yet.
///
/// True for a `*` header with a valid count, or a `*` header still short
/// enough to become one. The connection handler lets such buffers grow well
/// past the limit it applies to stray input.
pub fn is_partial_frame(buf: &[u8]) -> bool {
    if buf.first() != Some(&prefix::ARRAY) {
        return false;
    }

    match find_crlf(buf) {
        Some(end) => parse_count(&buf[1..end]).is_some(),
        None => buf.len() <= MAX_HEADER_LEN,
    }
}

fn stray_len(buf: &[u8]) -> Option<usize> {
    let array_start = buf.iter().position(|&b| b == prefix::ARRAY);

    match (find_crlf(buf), array_start) {
        (Some(crlf), Some(start)) if start < crlf => Some(start),
        (Some(crlf), _) => Some(crlf + 2),
        (None, start) => start,
    }
}

/// Finds the position of CRLF in the buffer.
///
/// Returns the position of `\r` if found, or None if CRLF is not present.
#[inline]
fn find_crlf(buf: &[u8]) -> Option<usize> {
    for i in 0..buf.len().saturating_sub(1) {
        if buf[i] == b'\r' && buf[i + 1] == b'\n' {
            return Some(i);
        }
    }
    None
}

fn parse_count(digits: &[u8]) -> Option<usize> {
    std::str::from_utf8(digits).ok()?.parse().ok()
}
