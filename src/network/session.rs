//! Client Session
//!
//! Runs one request/reply exchange per command over TCP.

use std::io::ErrorKind;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::{RespError, Result};
use crate::protocol::{read_reply, write_command, Command, Reply};

/// Something that can turn a command into a reply
pub trait Exchange {
    /// Send one command and wait for its reply
    fn execute(&mut self, command: &Command) -> Result<Reply>;
}

/// TCP session against a RESP server
///
/// Opens a fresh connection for every command and closes it once the
/// reply has been read.
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
}

impl Session {
    /// Create a session after validating the config
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The session's configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send one command and read its reply
    pub fn execute(&self, command: &Command) -> Result<Reply> {
        let mut stream = self.connect()?;
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        tracing::debug!("Connected to {} for {}", peer_addr, command.name());

        write_command(&mut stream, command)?;

        let result = read_reply(
            &mut stream,
            self.config.read_buffer_size,
            self.config.max_reply_size,
        );

        match &result {
            Ok(reply) => tracing::trace!("Reply from {}: {:?}", peer_addr, reply),
            Err(RespError::Io(e))
                if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) =>
            {
                // Windows reports TimedOut where Unix reports WouldBlock
                tracing::debug!("Read timeout waiting on {}", peer_addr);
            }
            Err(e) => tracing::debug!("Exchange with {} failed: {}", peer_addr, e),
        }

        tracing::debug!("Closing connection to {}", peer_addr);
        result
    }

    /// Resolve the server address and connect to the first reachable one
    fn connect(&self) -> Result<TcpStream> {
        let addrs: Vec<SocketAddr> = self.config.server_addr.to_socket_addrs()?.collect();

        let mut last_err = None;
        for addr in addrs {
            match self.connect_addr(&addr) {
                Ok(stream) => {
                    self.configure(&stream)?;
                    return Ok(stream);
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        Err(match last_err {
            Some(e) => e.into(),
            None => RespError::Config(format!(
                "server address {} did not resolve",
                self.config.server_addr
            )),
        })
    }

    fn connect_addr(&self, addr: &SocketAddr) -> std::io::Result<TcpStream> {
        match self.config.connect_timeout_ms {
            0 => TcpStream::connect(addr),
            ms => TcpStream::connect_timeout(addr, Duration::from_millis(ms)),
        }
    }

    /// Disable Nagle and apply the configured timeouts
    fn configure(&self, stream: &TcpStream) -> Result<()> {
        stream.set_nodelay(true)?;

        if self.config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(self.config.read_timeout_ms)))?;
        }
        if self.config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(self.config.write_timeout_ms)))?;
        }

        Ok(())
    }
}

impl Exchange for Session {
    fn execute(&mut self, command: &Command) -> Result<Reply> {
        Session::execute(self, command)
    }
}
