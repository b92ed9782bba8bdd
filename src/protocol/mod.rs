//! Protocol Module
//!
//! Client side of the REdis Serialization Protocol, version 2.
//!
//! ## Request Format
//! Every command is sent as an array of bulk strings:
//! ```text
//! *3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n
//! ```
//!
//! ## Reply Types
//! - `+` Simple string
//! - `-` Error
//! - `:` Integer
//! - `$` Bulk string (`$-1` is nil)
//! - `*` Array of bulk strings (`*-1` is nil)
//!
//! RESP3 types and inline commands are not supported.

mod command;
mod reply;
mod scan;
mod codec;

pub use command::{Command, EXIT_KEYWORD};
pub use reply::{Reply, NIL_DISPLAY};
pub use codec::{
    encode_command, decode_reply, reply_frame_len, parse_request,
    read_reply, write_command, CRLF, NIL_LENGTH,
};
