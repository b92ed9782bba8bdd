//! Tests for the interactive console
//!
//! These tests verify:
//! - Replies are rendered one per line
//! - Blank lines are skipped and `exit` stops the loop
//! - A failed exchange is reported without ending the session

use std::collections::VecDeque;
use std::io::Cursor;

use bytes::Bytes;
use respline::protocol::{Command, Reply};
use respline::{Console, Exchange, RespError, Result};

/// Exchange that answers from a script and records what it was sent
#[derive(Default)]
struct ScriptedExchange {
    replies: VecDeque<Result<Reply>>,
    seen: Vec<Vec<String>>,
}

impl ScriptedExchange {
    fn with(replies: Vec<Result<Reply>>) -> Self {
        Self {
            replies: replies.into(),
            seen: Vec::new(),
        }
    }
}

impl Exchange for ScriptedExchange {
    fn execute(&mut self, command: &Command) -> Result<Reply> {
        self.seen.push(command.args().to_vec());
        self.replies
            .pop_front()
            .unwrap_or_else(|| Err(RespError::Protocol("script exhausted".to_string())))
    }
}

fn run_console(input: &str, replies: Vec<Result<Reply>>) -> (String, ScriptedExchange) {
    let mut console = Console::new(ScriptedExchange::with(replies));
    let mut output = Vec::new();
    console.run(Cursor::new(input), &mut output).unwrap();
    (String::from_utf8(output).unwrap(), console.into_inner())
}

// =============================================================================
// Loop Tests
// =============================================================================

#[test]
fn test_run_renders_each_reply() {
    let (output, exchange) = run_console(
        "SET k v\nGET k\nINCR n\nLRANGE l 0 -1\nGET missing\n",
        vec![
            Ok(Reply::Simple("OK".to_string())),
            Ok(Reply::Bulk(Some(Bytes::from_static(b"v")))),
            Ok(Reply::Integer(7)),
            Ok(Reply::Array(Some(vec![
                Reply::Bulk(Some(Bytes::from_static(b"a"))),
                Reply::Bulk(None),
            ]))),
            Ok(Reply::Bulk(None)),
        ],
    );

    assert_eq!(output, "OK\nv\n(integer)7\n[a, -1]\n-1\n");
    assert_eq!(exchange.seen.len(), 5);
    assert_eq!(exchange.seen[3], vec!["LRANGE", "l", "0", "-1"]);
}

#[test]
fn test_run_skips_blank_lines() {
    let (output, exchange) = run_console(
        "\n   \n\t\nPING\n\n",
        vec![Ok(Reply::Simple("PONG".to_string()))],
    );

    assert_eq!(output, "PONG\n");
    assert_eq!(exchange.seen, vec![vec!["PING".to_string()]]);
}

#[test]
fn test_run_stops_at_exit() {
    let (output, exchange) = run_console(
        "PING\nexit\nPING\n",
        vec![
            Ok(Reply::Simple("PONG".to_string())),
            Ok(Reply::Simple("PONG".to_string())),
        ],
    );

    assert_eq!(output, "PONG\n");
    assert_eq!(exchange.seen.len(), 1);
}

#[test]
fn test_run_stops_at_eof_without_newline() {
    let (output, _) = run_console("ECHO hi", vec![Ok(Reply::Bulk(Some(Bytes::from_static(b"hi"))))]);
    assert_eq!(output, "hi\n");
}

#[test]
fn test_run_prints_error_replies_as_text() {
    let (output, _) = run_console(
        "FOO\n",
        vec![Ok(Reply::Error("ERR unknown command 'FOO'".to_string()))],
    );
    assert_eq!(output, "ERR unknown command 'FOO'\n");
}

#[test]
fn test_run_continues_after_failed_exchange() {
    let (output, exchange) = run_console(
        "GET a\nGET b\n",
        vec![
            Err(RespError::Protocol("unrecognized reply type: '?'".to_string())),
            Ok(Reply::Simple("OK".to_string())),
        ],
    );

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("(error) Protocol error"));
    assert_eq!(lines[1], "OK");
    assert_eq!(exchange.seen.len(), 2);
}

// =============================================================================
// One-shot Tests
// =============================================================================

#[test]
fn test_run_once_reports_outcome() {
    let mut console = Console::new(ScriptedExchange::with(vec![
        Ok(Reply::Simple("OK".to_string())),
        Ok(Reply::Error("ERR nope".to_string())),
        Err(RespError::ReplyTooLarge { limit: 10 }),
    ]));
    let command = Command::parse("SET k v").unwrap();
    let mut output = Vec::new();

    assert!(console.run_once(&command, &mut output).unwrap());
    assert!(!console.run_once(&command, &mut output).unwrap());
    assert!(!console.run_once(&command, &mut output).unwrap());

    let output = String::from_utf8(output).unwrap();
    assert_eq!(
        output,
        "OK\nERR nope\n(error) Reply exceeds maximum size of 10 bytes\n"
    );
}
