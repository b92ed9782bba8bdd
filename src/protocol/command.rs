//! Command definitions
//!
//! Represents a command typed by the user, split into arguments.

use crate::error::{RespError, Result};

use super::codec::encode_command;

/// Console keyword that ends an interactive session
pub const EXIT_KEYWORD: &str = "exit";

/// A tokenized command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    args: Vec<String>,
}

impl Command {
    /// Build a command from pre-split arguments
    ///
    /// Fails with `InvalidCommand` if there are no arguments or any
    /// argument is empty.
    pub fn new<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        if args.is_empty() {
            return Err(RespError::InvalidCommand("command is empty".to_string()));
        }
        if let Some(pos) = args.iter().position(|a| a.is_empty()) {
            return Err(RespError::InvalidCommand(format!(
                "argument {} is empty",
                pos
            )));
        }

        Ok(Self { args })
    }

    /// Tokenize a raw input line on space separators
    ///
    /// Leading and trailing whitespace is trimmed and runs of spaces act as
    /// a single separator.
    pub fn parse(line: &str) -> Result<Self> {
        let args: Vec<&str> = line.trim().split(' ').filter(|t| !t.is_empty()).collect();

        if args.is_empty() {
            return Err(RespError::InvalidCommand("command is empty".to_string()));
        }

        Self::new(args)
    }

    /// The command name (first token)
    pub fn name(&self) -> &str {
        &self.args[0]
    }

    /// All arguments, name included
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether this is the console's exit keyword
    pub fn is_exit(&self) -> bool {
        self.args.len() == 1 && self.args[0] == EXIT_KEYWORD
    }

    /// Encode as a RESP array of bulk strings
    pub fn encode(&self) -> Result<Vec<u8>> {
        encode_command(&self.args)
    }
}
