//! # respline
//!
//! A minimal client for the REdis Serialization Protocol (RESP2):
//! - Encodes a command line as an array of bulk strings
//! - Decodes the five RESP2 reply types into a displayable value
//! - Assembles complete reply frames from a TCP stream
//! - Interactive console with one connection per command
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Console                               │
//! │              (stdin lines → rendered replies)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Session                               │
//! │         (connect → write → framing loop → close)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Encoder   │          │   Decoder   │
//!   │  (request)  │          │   (reply)   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod console;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RespError, Result};
pub use config::Config;
pub use console::Console;
pub use network::{Exchange, Session};
pub use protocol::{decode_reply, encode_command, Command, Reply};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of respline
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
