//! Tests for command tokenizing

use respline::protocol::Command;
use respline::RespError;

#[test]
fn test_parse_splits_on_spaces() {
    let command = Command::parse("SET key value").unwrap();
    assert_eq!(command.args(), &["SET", "key", "value"]);
    assert_eq!(command.name(), "SET");
}

#[test]
fn test_parse_trims_and_collapses_spaces() {
    let command = Command::parse("  GET   key  \n").unwrap();
    assert_eq!(command.args(), &["GET", "key"]);
}

#[test]
fn test_parse_keeps_tabs_inside_tokens() {
    let command = Command::parse("ECHO a\tb").unwrap();
    assert_eq!(command.args(), &["ECHO", "a\tb"]);
}

#[test]
fn test_parse_blank_line() {
    assert!(matches!(Command::parse(""), Err(RespError::InvalidCommand(_))));
    assert!(matches!(Command::parse("   "), Err(RespError::InvalidCommand(_))));
}

#[test]
fn test_new_rejects_empty() {
    let result = Command::new(Vec::<String>::new());
    assert!(matches!(result, Err(RespError::InvalidCommand(_))));
}

#[test]
fn test_new_rejects_empty_argument() {
    let result = Command::new(["SET", "key", ""]);
    assert!(matches!(result, Err(RespError::InvalidCommand(_))));
}

#[test]
fn test_new_allows_spaces_in_arguments() {
    let command = Command::new(["SET", "greeting", "hello world"]).unwrap();
    let encoded = command.encode().unwrap();
    assert!(encoded.ends_with(b"$11\r\nhello world\r\n"));
}

#[test]
fn test_exit_keyword() {
    assert!(Command::parse("exit").unwrap().is_exit());
    assert!(Command::parse("  exit ").unwrap().is_exit());
    assert!(!Command::parse("EXIT").unwrap().is_exit());
    assert!(!Command::parse("exit now").unwrap().is_exit());
}
