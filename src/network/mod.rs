//! Network Module
//!
//! TCP transport for the client.
//!
//! ## Exchange Model
//! - One connection per command
//! - Write the whole request, then read until a complete reply frame
//! - Reads are bounded by the configured timeouts and maximum reply size

mod session;

pub use session::{Exchange, Session};
