//! Protocol codec
//!
//! Encoding of requests and decoding of replies for RESP2.
//!
//! ## Wire Format
//!
//! ### Request Format
//! ```text
//! *<argc>\r\n
//! $<len>\r\n<arg bytes>\r\n      (repeated argc times)
//! ```
//!
//! ### Reply Format
//! ```text
//! ┌──────────┬──────────────────────────────────────────────┐
//! │ Sentinel │ Body                                         │
//! ├──────────┼──────────────────────────────────────────────┤
//! │    +     │ <text>\r\n                                   │
//! │    -     │ <message>\r\n                                │
//! │    :     │ <signed decimal>\r\n                         │
//! │    $     │ <len>\r\n<len bytes>\r\n   or  -1\r\n        │
//! │    *     │ <count>\r\n<count bulk strings>  or  -1\r\n  │
//! └──────────┴──────────────────────────────────────────────┘
//! ```

use std::io::{ErrorKind, Read, Write};

use bytes::{Bytes, BytesMut};

use crate::error::{RespError, Result};
use super::scan::{find_crlf, find_dollar, parse_int};
use super::{Command, Reply};

/// Field terminator
pub const CRLF: &[u8] = b"\r\n";

/// Length value marking a nil bulk string or nil array
pub const NIL_LENGTH: i64 = -1;

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode arguments as a RESP array of bulk strings
///
/// Format: `*<argc>\r\n` then `$<len>\r\n<arg>\r\n` per argument
pub fn encode_command<T: AsRef<[u8]>>(args: &[T]) -> Result<Vec<u8>> {
    if args.is_empty() {
        return Err(RespError::InvalidCommand(
            "command has no arguments".to_string(),
        ));
    }

    // Payload plus a generous allowance for each length header
    let capacity = args.iter().map(|a| a.as_ref().len() + 16).sum::<usize>() + 16;
    let mut message = Vec::with_capacity(capacity);

    message.push(b'*');
    message.extend_from_slice(args.len().to_string().as_bytes());
    message.extend_from_slice(CRLF);

    for (i, arg) in args.iter().enumerate() {
        let arg = arg.as_ref();
        if arg.is_empty() {
            return Err(RespError::InvalidCommand(format!("argument {} is empty", i)));
        }
        message.push(b'$');
        message.extend_from_slice(arg.len().to_string().as_bytes());
        message.extend_from_slice(CRLF);
        message.extend_from_slice(arg);
        message.extend_from_slice(CRLF);
    }

    Ok(message)
}

/// Decode a request frame back into its arguments
///
/// The whole buffer must be exactly one array of non-nil bulk strings.
pub fn parse_request(bytes: &[u8]) -> Result<Vec<Vec<u8>>> {
    match bytes.first() {
        Some(b'*') => {}
        Some(&other) => {
            return Err(RespError::Protocol(format!(
                "request must start with '*', got {:?}",
                other as char
            )))
        }
        None => return Err(RespError::Protocol("empty request".to_string())),
    }

    let len = FrameScan::default()
        .advance(bytes, usize::MAX)?
        .ok_or_else(|| truncated(bytes.len()))?;
    if len != bytes.len() {
        return Err(RespError::Protocol(format!(
            "{} trailing bytes after request",
            bytes.len() - len
        )));
    }

    let items = match build_reply(&Bytes::copy_from_slice(bytes))? {
        Reply::Array(Some(items)) => items,
        _ => {
            return Err(RespError::Protocol(
                "request argument count must not be nil".to_string(),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Reply::Bulk(Some(arg)) => Ok(arg.to_vec()),
            _ => Err(RespError::Protocol(format!("request argument {} is nil", i))),
        })
        .collect()
}

// =============================================================================
// Reply Decoding
// =============================================================================

/// Decode the reply at the start of a buffer
///
/// Bytes after the first complete frame are ignored.
pub fn decode_reply(bytes: &[u8]) -> Result<Reply> {
    if bytes.is_empty() {
        return Err(RespError::Protocol("empty reply".to_string()));
    }

    let len = FrameScan::default()
        .advance(bytes, usize::MAX)?
        .ok_or_else(|| truncated(bytes.len()))?;

    build_reply(&Bytes::copy_from_slice(&bytes[..len]))
}

/// Length of the first complete reply frame in the buffer
///
/// Returns `None` when more bytes are needed.
pub fn reply_frame_len(bytes: &[u8]) -> Result<Option<usize>> {
    FrameScan::default().advance(bytes, usize::MAX)
}

/// Resumable completeness check for one reply frame
///
/// Validates the frame without copying anything. When the buffer runs out
/// the scan remembers how far it got, so feeding it a growing buffer
/// examines each byte a bounded number of times.
#[derive(Debug, Default)]
struct FrameScan {
    /// Start of the element (or frame) being scanned
    pos: usize,

    /// Where the terminator search for the current header resumes
    crlf_from: usize,

    /// Declared element count, once an array header has been read
    count: Option<u64>,

    /// Array elements already validated
    index: u64,
}

impl FrameScan {
    /// Scan `bytes`, which must extend the buffer seen by earlier calls
    ///
    /// Returns the frame length once it is complete. Fails with
    /// `ReplyTooLarge` as soon as a declared length reaches past `limit`.
    fn advance(&mut self, bytes: &[u8], limit: usize) -> Result<Option<usize>> {
        let count = match self.count {
            Some(count) => count,
            None => {
                let Some(&sentinel) = bytes.first() else {
                    return Ok(None);
                };
                if !matches!(sentinel, b'+' | b'-' | b':' | b'$' | b'*') {
                    return Err(unrecognized(sentinel));
                }

                let Some(end) = self.header_end(bytes, 0)? else {
                    return Ok(None);
                };

                match sentinel {
                    b'+' | b'-' => return Ok(Some(end + 2)),
                    b':' => {
                        parse_int(bytes, 1, end)?;
                        return Ok(Some(end + 2));
                    }
                    b'$' => return bulk_end(bytes, 0, end, limit),
                    _ => {}
                }

                let count = parse_int(bytes, 1, end)?;
                if count == NIL_LENGTH {
                    return Ok(Some(end + 2));
                }
                let count = u64::try_from(count).map_err(|_| {
                    RespError::Protocol(format!("invalid array length: {}", count))
                })?;

                self.pos = end + 2;
                self.crlf_from = 0;
                self.count = Some(count);
                count
            }
        };

        while self.index < count {
            let at = self.pos;
            if at >= bytes.len() {
                return Ok(None);
            }
            if bytes[at] != b'$' {
                return Err(match find_dollar(bytes, at) {
                    Some(found) => RespError::Protocol(format!(
                        "unexpected {} bytes before array element {} at offset {}",
                        found - at,
                        self.index,
                        at
                    )),
                    None => RespError::Protocol(format!(
                        "array element {} at offset {} is not a bulk string",
                        self.index, at
                    )),
                });
            }

            let Some(end) = self.header_end(bytes, at)? else {
                return Ok(None);
            };
            let Some(next) = bulk_end(bytes, at, end, limit)? else {
                return Ok(None);
            };

            self.pos = next;
            self.crlf_from = 0;
            self.index += 1;
        }

        Ok(Some(self.pos))
    }

    /// Terminator of the header starting at `at`, resuming an earlier search
    fn header_end(&mut self, bytes: &[u8], at: usize) -> Result<Option<usize>> {
        let from = self.crlf_from.max(at + 1);
        let found = find_crlf(bytes, from)?;
        if found.is_none() {
            // A trailing '\r' still needs its '\n' checked
            self.crlf_from = bytes.len().saturating_sub(1).max(at + 1);
        }
        Ok(found)
    }
}

/// End of a bulk string whose header spans `at..end`
fn bulk_end(bytes: &[u8], at: usize, end: usize, limit: usize) -> Result<Option<usize>> {
    let len = parse_int(bytes, at + 1, end)?;
    if len == NIL_LENGTH {
        return Ok(Some(end + 2));
    }
    if len < 0 {
        return Err(RespError::Protocol(format!(
            "invalid bulk string length: {}",
            len
        )));
    }

    let frame_end = usize::try_from(len)
        .ok()
        .and_then(|len| (end + 2).checked_add(len))
        .and_then(|data_end| data_end.checked_add(CRLF.len()))
        .ok_or_else(|| {
            RespError::Protocol(format!("bulk string length too large: {}", len))
        })?;

    if frame_end > limit {
        return Err(RespError::ReplyTooLarge { limit });
    }
    if bytes.len() < frame_end {
        return Ok(None);
    }
    if &bytes[frame_end - CRLF.len()..frame_end] != CRLF {
        return Err(RespError::Protocol(format!(
            "bulk string of length {} is not terminated by CRLF",
            len
        )));
    }

    Ok(Some(frame_end))
}

/// Build the value of a frame that `FrameScan` has already accepted
///
/// Bulk payloads are slices of `frame`, not copies.
fn build_reply(frame: &Bytes) -> Result<Reply> {
    let end = line_end(frame, 0)?;

    match frame[0] {
        b'+' => Ok(Reply::Simple(
            String::from_utf8_lossy(&frame[1..end]).into_owned(),
        )),
        b'-' => Ok(Reply::Error(
            String::from_utf8_lossy(&frame[1..end]).into_owned(),
        )),
        b':' => Ok(Reply::Integer(parse_int(frame, 1, end)?)),
        b'$' => Ok(Reply::Bulk(slice_bulk(frame, 0, end)?.0)),
        b'*' => {
            let count = parse_int(frame, 1, end)?;
            if count == NIL_LENGTH {
                return Ok(Reply::Array(None));
            }

            let mut items = Vec::with_capacity((count.max(0) as usize).min(frame.len()));
            let mut pos = end + 2;
            for _ in 0..count {
                let end = line_end(frame, pos)?;
                let (data, next) = slice_bulk(frame, pos, end)?;
                items.push(Reply::Bulk(data));
                pos = next;
            }
            Ok(Reply::Array(Some(items)))
        }
        other => Err(unrecognized(other)),
    }
}

fn line_end(frame: &[u8], at: usize) -> Result<usize> {
    find_crlf(frame, at + 1)?.ok_or_else(|| truncated(frame.len()))
}

/// Payload of the bulk string at `at` and the offset just past it
fn slice_bulk(frame: &Bytes, at: usize, end: usize) -> Result<(Option<Bytes>, usize)> {
    let len = parse_int(frame, at + 1, end)?;
    if len == NIL_LENGTH {
        return Ok((None, end + 2));
    }

    let start = end + 2;
    let data_end = start + len as usize;
    if data_end + CRLF.len() > frame.len() {
        return Err(truncated(frame.len()));
    }
    Ok((Some(frame.slice(start..data_end)), data_end + CRLF.len()))
}

fn unrecognized(sentinel: u8) -> RespError {
    RespError::Protocol(format!(
        "unrecognized reply type: {:?}",
        sentinel as char
    ))
}

fn truncated(len: usize) -> RespError {
    RespError::Protocol(format!("truncated frame: incomplete after {} bytes", len))
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    let bytes = command.encode()?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    tracing::trace!("Sent {} bytes for {}", bytes.len(), command.name());
    Ok(())
}

/// Read one complete reply from a stream
///
/// Keeps reading, up to `read_buffer_size` bytes per call, until a whole
/// frame has been assembled. The completeness scan resumes where the last
/// read left off, and bulk payloads are handed out as slices of the read
/// buffer. Fails with `ReplyTooLarge` once the frame is known to exceed
/// `max_reply_size` bytes.
pub fn read_reply<R: Read>(
    reader: &mut R,
    read_buffer_size: usize,
    max_reply_size: usize,
) -> Result<Reply> {
    let mut buffer = BytesMut::with_capacity(read_buffer_size.min(max_reply_size));
    let mut scan = FrameScan::default();
    // Bytes received; anything past this in `buffer` is zeroed read space
    let mut filled = 0;

    loop {
        if filled > 0 {
            if let Some(len) = scan.advance(&buffer[..filled], max_reply_size)? {
                if len < filled {
                    tracing::trace!("Ignoring {} bytes after reply", filled - len);
                }
                tracing::trace!("Received {} byte reply", len);
                buffer.truncate(filled);
                let frame = buffer.split_to(len).freeze();
                return build_reply(&frame);
            }
        }

        if filled >= max_reply_size {
            return Err(RespError::ReplyTooLarge {
                limit: max_reply_size,
            });
        }

        let chunk = read_buffer_size.min(max_reply_size - filled).max(1);
        if buffer.len() < filled + chunk {
            buffer.resize(filled + chunk, 0);
        }

        let n = loop {
            match reader.read(&mut buffer[filled..filled + chunk]) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };

        if n == 0 {
            return Err(if filled == 0 {
                RespError::Protocol("connection closed before reply".to_string())
            } else {
                truncated(filled)
            });
        }
        filled += n;
    }
}
