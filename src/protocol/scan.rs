//! Byte-scanning helpers shared by the reply decoder.
//!
//! All offsets are absolute positions in the scanned buffer.

use crate::error::{RespError, Result};

/// Find the `\r` of the next `\r\n` at or after `from`
///
/// A `\r` followed by anything other than `\n` is malformed. A `\r` in the
/// last position cannot be checked yet and counts as not found.
pub(crate) fn find_crlf(buf: &[u8], from: usize) -> Result<Option<usize>> {
    let mut pos = from;
    while pos + 1 < buf.len() {
        if buf[pos] == b'\r' {
            if buf[pos + 1] != b'\n' {
                return Err(RespError::Protocol(format!(
                    "malformed reply: bare CR at offset {}",
                    pos
                )));
            }
            return Ok(Some(pos));
        }
        pos += 1;
    }
    Ok(None)
}

/// Find the next `$` sentinel at or after `from`
pub(crate) fn find_dollar(buf: &[u8], from: usize) -> Option<usize> {
    buf.get(from..)?
        .iter()
        .position(|&b| b == b'$')
        .map(|i| from + i)
}

/// Parse a signed decimal integer from `buf[start..end]`
pub(crate) fn parse_int(buf: &[u8], start: usize, end: usize) -> Result<i64> {
    let field = buf
        .get(start..end)
        .ok_or_else(|| invalid_integer(&[]))?;

    let (negative, digits) = match field.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, field),
    };

    if digits.is_empty() {
        return Err(invalid_integer(field));
    }

    let mut value: i64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(invalid_integer(field));
        }
        let digit = i64::from(b - b'0');
        // Accumulate toward the sign so i64::MIN stays representable
        value = value
            .checked_mul(10)
            .and_then(|v| {
                if negative {
                    v.checked_sub(digit)
                } else {
                    v.checked_add(digit)
                }
            })
            .ok_or_else(|| invalid_integer(field))?;
    }

    Ok(value)
}

fn invalid_integer(field: &[u8]) -> RespError {
    RespError::Protocol(format!(
        "invalid integer field: {:?}",
        String::from_utf8_lossy(field)
    ))
}
