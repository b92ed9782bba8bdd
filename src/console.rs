//! Interactive console
//!
//! Reads command lines, sends them through an [`Exchange`] and prints the
//! rendered replies.

use std::io::{BufRead, Write};

use crate::error::{RespError, Result};
use crate::network::Exchange;
use crate::protocol::Command;

/// Prefix for failed exchanges in console output
pub const ERROR_PREFIX: &str = "(error)";

/// Line-oriented front end over an exchange
pub struct Console<E: Exchange> {
    exchange: E,
}

impl<E: Exchange> Console<E> {
    pub fn new(exchange: E) -> Self {
        Self { exchange }
    }

    /// Give back the underlying exchange
    pub fn into_inner(self) -> E {
        self.exchange
    }

    /// Process lines until EOF or `exit`
    ///
    /// Blank lines are skipped. A failed exchange is reported on `output`
    /// and the loop moves on to the next line; only I/O errors on `input`
    /// or `output` end the loop early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            let command = match Command::parse(&line) {
                Ok(command) => command,
                // Blank line
                Err(RespError::InvalidCommand(_)) => continue,
                Err(e) => return Err(e),
            };

            if command.is_exit() {
                tracing::debug!("Exit requested");
                break;
            }

            self.run_once(&command, output)?;
        }

        output.flush()?;
        Ok(())
    }

    /// Execute a single command and print its outcome
    ///
    /// Returns `false` if the exchange failed or the server replied with an
    /// error.
    pub fn run_once<W: Write>(&mut self, command: &Command, output: &mut W) -> Result<bool> {
        match self.exchange.execute(command) {
            Ok(reply) => {
                writeln!(output, "{}", reply)?;
                Ok(!reply.is_error())
            }
            Err(e) => {
                tracing::warn!("Command {} failed: {}", command.name(), e);
                writeln!(output, "{} {}", ERROR_PREFIX, e)?;
                Ok(false)
            }
        }
    }
}
