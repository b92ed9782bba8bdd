//! Reply definitions
//!
//! Represents a decoded server reply and its display form.

use std::fmt;

use bytes::Bytes;

/// Display form of a nil bulk string or nil array
pub const NIL_DISPLAY: &str = "-1";

/// A decoded RESP2 reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Simple string: `+OK\r\n`
    Simple(String),

    /// Error: `-ERR message\r\n`
    Error(String),

    /// Integer: `:1000\r\n`
    Integer(i64),

    /// Bulk string: `$6\r\nfoobar\r\n`, or nil for `$-1\r\n`
    Bulk(Option<Bytes>),

    /// Array: `*2\r\n...`, or nil for `*-1\r\n`
    ///
    /// Decoded arrays only hold `Bulk` elements.
    Array(Option<Vec<Reply>>),
}

impl Reply {
    /// Whether the server answered with an error reply
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }

    /// Whether this is a nil bulk string or nil array
    pub fn is_nil(&self) -> bool {
        matches!(self, Reply::Bulk(None) | Reply::Array(None))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Simple(s) | Reply::Error(s) => f.write_str(s),
            Reply::Integer(n) => write!(f, "(integer){}", n),
            Reply::Bulk(Some(data)) => f.write_str(&String::from_utf8_lossy(data)),
            Reply::Bulk(None) | Reply::Array(None) => f.write_str(NIL_DISPLAY),
            Reply::Array(Some(items)) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}
