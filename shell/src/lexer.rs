//! Quote-aware word splitting for input lines.
//!
//! Whitespace separates words; single quotes group literally; double
//! quotes group with `\"` and `\\` escapes; a bare backslash escapes the
//! next character. Mismatched quoting is a parse error surfaced to the
//! caller, never swallowed.

use crate::error::{VshError, VshResult};

/// Split one input line into shell-like words.
pub fn split_line(line: &str) -> VshResult<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut has_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            '\'' => {
                has_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => {
                            return Err(VshError::Parse("unterminated single quote".to_string()))
                        }
                    }
                }
            }
            '"' => {
                has_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped @ ('"' | '\\')) => current.push(escaped),
                            Some(other) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => {
                                return Err(VshError::Parse(
                                    "unterminated double quote".to_string(),
                                ))
                            }
                        },
                        Some(c) => current.push(c),
                        None => {
                            return Err(VshError::Parse("unterminated double quote".to_string()))
                        }
                    }
                }
            }
            '\\' => {
                has_word = true;
                match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => return Err(VshError::Parse("trailing backslash".to_string())),
                }
            }
            c => {
                has_word = true;
                current.push(c);
            }
        }
    }

    if has_word {
        words.push(current);
    }
    Ok(words)
}
