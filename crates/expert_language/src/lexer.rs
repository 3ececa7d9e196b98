//! Tokenizer for the expert-system input grammar.
//!
//! A single left-to-right scan: newlines and uppercase letters are
//! recognized directly, whitespace is skipped, and every other character
//! must start one of the fixed operator/section-marker spellings. Anything
//! else is an unrecognized-character error pointing at its line.

use crate::error::{ParseError, ParseResult};
use crate::token::{Token, TokenKind};
use expert_base::Span;

fn starts_with_at(chars: &[char], i: usize, pat: &str) -> bool {
    let pat_chars: Vec<char> = pat.chars().collect();
    if i + pat_chars.len() > chars.len() {
        return false;
    }
    chars[i..i + pat_chars.len()] == pat_chars[..]
}

/// Tokenizes a complete program source into a flat token stream, one
/// [`TokenKind::NewLine`] per source line break.
pub fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut line = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            tokens.push(Token::new(TokenKind::NewLine, Span::new(line)));
            line += 1;
            i += 1;
            continue;
        }

        if c.is_ascii_uppercase() {
            tokens.push(Token::new(TokenKind::Var(c), Span::new(line)));
            i += 1;
            continue;
        }

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == '#' {
            let start = i + 1;
            let mut end = start;
            while end < chars.len() && chars[end] != '\n' {
                end += 1;
            }
            let text: String = chars[start..end].iter().collect();
            tokens.push(Token::new(
                TokenKind::Comment(text.trim().to_string()),
                Span::new(line),
            ));
            i = end;
            continue;
        }

        if starts_with_at(&chars, i, "<=>") {
            tokens.push(Token::new(TokenKind::Iff, Span::new(line)));
            i += 3;
            continue;
        }
        if starts_with_at(&chars, i, "=>") {
            tokens.push(Token::new(TokenKind::Imply, Span::new(line)));
            i += 2;
            continue;
        }

        match c {
            '+' => {
                tokens.push(Token::new(TokenKind::And, Span::new(line)));
                i += 1;
            }
            '|' => {
                tokens.push(Token::new(TokenKind::Or, Span::new(line)));
                i += 1;
            }
            '^' => {
                tokens.push(Token::new(TokenKind::Xor, Span::new(line)));
                i += 1;
            }
            '!' => {
                tokens.push(Token::new(TokenKind::Not, Span::new(line)));
                i += 1;
            }
            '(' => {
                tokens.push(Token::new(TokenKind::LParen, Span::new(line)));
                i += 1;
            }
            ')' => {
                tokens.push(Token::new(TokenKind::RParen, Span::new(line)));
                i += 1;
            }
            '=' => {
                require_line_start(&tokens, line, "'='")?;
                tokens.push(Token::new(TokenKind::Fact, Span::new(line)));
                i += 1;
            }
            '?' => {
                require_line_start(&tokens, line, "'?'")?;
                tokens.push(Token::new(TokenKind::Query, Span::new(line)));
                i += 1;
            }
            other => {
                return Err(ParseError::new(
                    format!("invalid character '{}'", other),
                    Span::new(line),
                ));
            }
        }
    }

    Ok(tokens)
}

fn require_line_start(tokens: &[Token], line: usize, what: &str) -> ParseResult<()> {
    match tokens.last() {
        None => Ok(()),
        Some(t) if t.kind == TokenKind::NewLine => Ok(()),
        Some(_) => Err(ParseError::new(
            format!("{} must be the first token on its line", what),
            Span::new(line),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_a_simple_rule_line() {
        let tokens = tokenize("A=>B").unwrap();
        assert_eq!(
            tokens.iter().map(|t| t.kind.clone()).collect::<Vec<_>>(),
            vec![TokenKind::Var('A'), TokenKind::Imply, TokenKind::Var('B')]
        );
    }

    #[test]
    fn distinguishes_imply_from_iff() {
        let tokens = tokenize("A<=>B").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Iff);
    }

    #[test]
    fn rejects_fact_marker_mid_line() {
        let err = tokenize("A=B").unwrap_err();
        assert!(err.to_string().contains("first token"));
    }

    #[test]
    fn rejects_unknown_characters() {
        let err = tokenize("A@B").unwrap_err();
        assert!(err.to_string().contains("invalid character"));
    }

    #[test]
    fn captures_trailing_comment_text() {
        let tokens = tokenize("=A # the sun is up").unwrap();
        assert_eq!(
            tokens.last().unwrap().kind,
            TokenKind::Comment("the sun is up".to_string())
        );
    }
}
