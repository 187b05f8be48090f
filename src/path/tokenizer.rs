//! Lexer for the path-data mini-language.
//!
//! Splits a `d` attribute into command letters and numbers. Separators are
//! optional wherever the grammar allows it: `M10-5.5.5` is `M`, `10`, `-5.5`,
//! `.5`.

use crate::error::PathError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Command(char),
    Number(f64),
}

/// Tokenize a path `d` string into commands and numbers.
///
/// Every ASCII letter outside a number becomes a command token, valid or not;
/// rejecting unknown commands is the interpreter's job. The empty string has
/// no tokens; any other string without one, whitespace or commas alone
/// included, is malformed.
pub fn tokenize(data: &str) -> Result<Vec<Token>, PathError> {
    Ok(tokenize_with_offsets(data)?.into_iter().map(|(_, token)| token).collect())
}

/// Like [`tokenize`], pairing each token with its byte offset in `data`.
pub fn tokenize_with_offsets(data: &str) -> Result<Vec<(usize, Token)>, PathError> {
    let bytes = data.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let ch = bytes[i];
        if ch.is_ascii_whitespace() || ch == b',' {
            i += 1;
        } else if ch.is_ascii_alphabetic() {
            tokens.push((i, Token::Command(ch as char)));
            i += 1;
        } else if ch.is_ascii_digit() || matches!(ch, b'.' | b'-' | b'+') {
            let end = scan_number(bytes, i);
            if end == i {
                return Err(PathError::MalformedPathData {
                    offset: i,
                    reason: format!("'{}' does not start a number", ch as char),
                });
            }
            let text = &data[i..end];
            let value = text.parse::<f64>().map_err(|_| PathError::MalformedPathData {
                offset: i,
                reason: format!("invalid number '{}'", text),
            })?;
            tokens.push((i, Token::Number(value)));
            i = end;
        } else {
            let bad = data[i..].chars().next().unwrap_or('?');
            return Err(PathError::MalformedPathData {
                offset: i,
                reason: format!("unexpected character '{}'", bad),
            });
        }
    }

    if tokens.is_empty() && !data.is_empty() {
        return Err(PathError::MalformedPathData {
            offset: 0,
            reason: "no commands or numbers".to_string(),
        });
    }

    Ok(tokens)
}

/// Returns the end offset of the number starting at `start`, or `start` if
/// there is no number there.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        i = j;
    }

    if digits == 0 {
        return start;
    }

    // Exponent only counts when digits follow; otherwise the 'e' is left for
    // the caller to report.
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use Token::*;

    #[test]
    fn test_tokenize_spaced() {
        let tokens = tokenize("M 10 20 L 30,40 Z").unwrap();
        assert_eq!(
            tokens,
            vec![Command('M'), Number(10.0), Number(20.0), Command('L'), Number(30.0), Number(40.0), Command('Z')]
        );
    }

    #[test]
    fn test_tokenize_compact_signs_and_dots() {
        let tokens = tokenize("M10-5.5.5l-1-2").unwrap();
        assert_eq!(
            tokens,
            vec![Command('M'), Number(10.0), Number(-5.5), Number(0.5), Command('l'), Number(-1.0), Number(-2.0)]
        );
    }

    #[test]
    fn test_tokenize_exponent() {
        let tokens = tokenize("M1e2 -2.5E-1 3e+1").unwrap();
        assert_eq!(tokens, vec![Command('M'), Number(100.0), Number(-0.25), Number(30.0)]);
    }

    #[test]
    fn test_dangling_exponent_becomes_command() {
        let tokens = tokenize("M1e").unwrap();
        assert_eq!(tokens, vec![Command('M'), Number(1.0), Command('e')]);
    }

    #[test]
    fn test_unknown_letters_are_tokens() {
        let tokens = tokenize("X 1 2").unwrap();
        assert_eq!(tokens[0], Command('X'));
    }

    #[test]
    fn test_empty_is_ok() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_separators_only_is_malformed() {
        assert!(matches!(tokenize(" , ,"), Err(PathError::MalformedPathData { .. })));
        assert!(matches!(tokenize("   "), Err(PathError::MalformedPathData { .. })));
    }

    #[test]
    fn test_offsets() {
        let tokens = tokenize_with_offsets("M10,-2 z").unwrap();
        assert_eq!(
            tokens,
            vec![(0, Command('M')), (1, Number(10.0)), (4, Number(-2.0)), (7, Command('z'))]
        );
    }

    #[test]
    fn test_lone_sign_is_malformed() {
        assert!(matches!(tokenize("M - 1"), Err(PathError::MalformedPathData { offset: 2, .. })));
    }

    #[test]
    fn test_unexpected_character() {
        assert!(matches!(tokenize("M 1 2 # 3"), Err(PathError::MalformedPathData { offset: 6, .. })));
    }
}
