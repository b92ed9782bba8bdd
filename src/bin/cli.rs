//! respline CLI Client
//!
//! Sends commands to a RESP server, either one-shot or from an
//! interactive console.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use respline::{Command, Config, Console, Session};
use tracing_subscriber::{fmt, EnvFilter};

/// respline CLI
#[derive(Parser, Debug)]
#[command(name = "respline-cli")]
#[command(about = "Minimal RESP2 client")]
#[command(version)]
struct Args {
    /// Server address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:6379")]
    server: String,

    /// Bytes requested per socket read
    #[arg(short, long, default_value = "256")]
    buffer_size: usize,

    /// Largest reply accepted, in bytes
    #[arg(short, long, default_value = "536870912")]
    max_reply_size: usize,

    /// Connect/read/write timeout in milliseconds (0 disables)
    #[arg(short, long, default_value = "5000")]
    timeout_ms: u64,

    /// Command to run once; starts the console when omitted
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> ExitCode {
    // Logs go to stderr so replies on stdout stay clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,respline=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .server_addr(&args.server)
        .read_buffer_size(args.buffer_size)
        .max_reply_size(args.max_reply_size)
        .timeout_ms(args.timeout_ms)
        .build();

    let session = match Session::new(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start session: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!("respline v{} targeting {}", respline::VERSION, args.server);

    let mut console = Console::new(session);
    let stdout = io::stdout();
    let mut output = stdout.lock();

    if args.command.is_empty() {
        let stdin = io::stdin();
        if let Err(e) = console.run(stdin.lock(), &mut output) {
            tracing::error!("Console error: {}", e);
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    let command = match Command::new(args.command) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let succeeded = match console.run_once(&command, &mut output) {
        Ok(ok) => ok,
        Err(e) => {
            tracing::error!("Output error: {}", e);
            false
        }
    };
    if let Err(e) = output.flush() {
        tracing::error!("Output error: {}", e);
        return ExitCode::FAILURE;
    }

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
