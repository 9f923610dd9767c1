//! Command-line encoding for the Microsoft C runtime argv rules.
//!
//! Windows hands a child process one flat string; the child's C runtime splits
//! it back into argv. [`encode_command_line`] produces that string from logical
//! arguments, and [`split_command_line`] is the matching parser.
//!
//! # Rules
//!
//! - An argument is wrapped in quotes only if it is empty or contains whitespace
//! - A `"` is always escaped as `\"`, and the backslashes immediately before it are doubled
//! - A backslash run before the closing quote is doubled
//! - Every other backslash is emitted literally

/// Encode logical arguments into a single command line.
///
/// Arguments are joined by exactly one space. This never fails: any string,
/// including the empty string, survives [`split_command_line`] unchanged.
///
/// # Examples
///
/// ```
/// use winprov::encode_command_line;
///
/// assert_eq!(encode_command_line(&["a b", "c"]), r#""a b" c"#);
/// assert_eq!(encode_command_line(&[r#"a"b"#]), r#"a\"b"#);
/// assert_eq!(encode_command_line(&[""]), r#""""#);
/// ```
pub fn encode_command_line<S: AsRef<str>>(args: &[S]) -> String {
    let mut line = String::new();

    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        encode_arg(arg.as_ref(), &mut line);
    }

    line
}

/// Append one encoded argument to `out`.
fn encode_arg(arg: &str, out: &mut String) {
    let quoted = needs_quoting(arg);
    if quoted {
        out.push('"');
    }

    let mut backslashes = 0usize;
    for c in arg.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                push_backslashes(out, backslashes * 2);
                backslashes = 0;
                out.push_str("\\\"");
            }
            _ => {
                push_backslashes(out, backslashes);
                backslashes = 0;
                out.push(c);
            }
        }
    }

    // A trailing run would otherwise escape the closing quote.
    if quoted {
        push_backslashes(out, backslashes * 2);
        out.push('"');
    } else {
        push_backslashes(out, backslashes);
    }
}

/// Whether an argument must be wrapped in quotes.
///
/// Quotes inside the argument do not trigger wrapping; they are escaped instead.
pub fn needs_quoting(arg: &str) -> bool {
    arg.is_empty() || arg.chars().any(char::is_whitespace)
}

fn push_backslashes(out: &mut String, count: usize) {
    out.extend(std::iter::repeat('\\').take(count));
}

/// Split a command line into arguments using the MS C runtime rules.
///
/// Every token, including the first, is parsed with the argument rules
/// (the runtime's special case for the program name is not applied):
///
/// - Space and tab outside quotes separate arguments
/// - `2n` backslashes before `"` yield `n` backslashes and toggle quoting
/// - `2n+1` backslashes before `"` yield `n` backslashes and a literal `"`
/// - Backslashes not followed by `"` are literal
/// - Inside quotes, `""` yields a literal `"`
///
/// This is the inverse of [`encode_command_line`]; it is never used to launch
/// anything.
pub fn split_command_line(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(' ' | '\t')) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let mut current = String::new();
        let mut in_quotes = false;
        let mut backslashes = 0usize;

        while let Some(&c) = chars.peek() {
            match c {
                '\\' => {
                    backslashes += 1;
                    chars.next();
                }
                '"' => {
                    chars.next();
                    push_backslashes(&mut current, backslashes / 2);
                    let escaped = backslashes % 2 == 1;
                    backslashes = 0;

                    if escaped {
                        current.push('"');
                    } else if in_quotes && chars.peek() == Some(&'"') {
                        chars.next();
                        current.push('"');
                    } else {
                        in_quotes = !in_quotes;
                    }
                }
                ' ' | '\t' if !in_quotes => break,
                _ => {
                    push_backslashes(&mut current, backslashes);
                    backslashes = 0;
                    current.push(c);
                    chars.next();
                }
            }
        }
        push_backslashes(&mut current, backslashes);

        args.push(current);
    }

    args
}
