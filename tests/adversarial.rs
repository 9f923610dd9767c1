//! Adversarial tests for the command-line encoder.
//!
//! These tests feed arguments crafted to break out of their quoting and check
//! that every argument still comes back as exactly one argv element.

use winprov::{encode_command_line, split_command_line};

fn assert_round_trip(args: &[&str]) {
    let line = encode_command_line(args);
    let parsed = split_command_line(&line);
    assert_eq!(parsed, args, "encoded line: {}", line);
}

// =============================================================================
// QUOTE BREAKOUT ATTACKS
// =============================================================================

#[test]
fn test_quote_breakout_with_whitespace() {
    // Attack: close the surrounding quote early and smuggle a second argument.
    assert_round_trip(&["tool.exe", "a\" --evil \"b"]);
    assert_round_trip(&["tool.exe", "\" --evil"]);
}

#[test]
fn test_quote_breakout_without_whitespace() {
    // No whitespace means no wrapping, but the quote must still be escaped.
    assert_round_trip(&["tool.exe", "\"--evil"]);
    assert_round_trip(&["tool.exe", "\"\"\""]);
}

#[test]
fn test_backslash_before_quote_cannot_unescape_it() {
    // Attack: pre-escape the escape so `\\"` would close quoting if not doubled.
    assert_round_trip(&["tool.exe", "a\\\" b"]);
    assert_round_trip(&["tool.exe", "a\\\\\" b"]);
    assert_round_trip(&["tool.exe", "\\\"\\\"\\\""]);
}

#[test]
fn test_trailing_backslash_cannot_escape_closing_quote() {
    // Attack: a trailing backslash in a quoted argument swallowing the next one.
    let line = encode_command_line(&["C:\\Program Files\\", "--evil"]);
    assert_eq!(
        split_command_line(&line),
        vec!["C:\\Program Files\\", "--evil"]
    );
}

#[test]
fn test_trailing_backslashes_of_every_parity() {
    for n in 0..8 {
        let quoted = format!("dir with spaces{}", "\\".repeat(n));
        let bare = format!("dir{}", "\\".repeat(n));
        assert_round_trip(&[quoted.as_str(), bare.as_str(), "next"]);
    }
}

// =============================================================================
// WHITESPACE AND EMPTY ARGUMENT ATTACKS
// =============================================================================

#[test]
fn test_empty_arguments_are_not_dropped() {
    // Attack: rely on empty arguments vanishing to shift positional meaning.
    assert_round_trip(&["tool.exe", "", "--flag", "", ""]);
}

#[test]
fn test_tabs_and_newlines_stay_inside_argument() {
    assert_round_trip(&["tool.exe", "a\tb", "c\nd", "\r\n"]);
}

#[test]
fn test_unicode_whitespace_is_quoted() {
    let line = encode_command_line(&["a\u{00a0}b"]);
    assert!(line.starts_with('"') && line.ends_with('"'));
    assert_round_trip(&["a\u{00a0}b", "\u{2003}"]);
}

#[test]
fn test_leading_and_trailing_spaces_preserved() {
    assert_round_trip(&["  padded  ", " ", "x"]);
}

// =============================================================================
// ARGUMENT COUNT INVARIANT
// =============================================================================

#[test]
fn test_argument_count_is_preserved() {
    let hostile = [
        "robocopy.exe",
        "\"",
        "\\",
        "\\\\",
        "\" \"",
        "\\\" \\\"",
        "a b\\",
        "& calc.exe",
        "%PATH%",
        "^\"",
    ];

    let line = encode_command_line(&hostile);
    assert_eq!(split_command_line(&line).len(), hostile.len());
}

#[test]
fn test_each_argument_is_one_contiguous_substring() {
    let args = ["pwsh.exe", "-Command", "& 'C:\\x y\\scoop.ps1' install git"];
    let line = encode_command_line(&args);

    let mut offset = 0;
    for arg in args {
        let encoded = encode_command_line(&[arg]);
        let at = line[offset..].find(&encoded).expect("encoded argument present") + offset;
        assert_eq!(at, offset, "argument {:?} not contiguous in {}", arg, line);
        offset = at + encoded.len() + 1;
    }
}
