//! Assembling a tokenized source into `(rules, facts, queries)`.
//!
//! Input is line-oriented: exactly one facts line (`=` followed by the
//! initially-true letters), exactly one queries line (`?` followed by the
//! queried letters), and any number of rule lines. A trailing `# comment`
//! on any line is captured and attached to whatever that line produced.

use crate::error::{ParseError, ParseResult};
use crate::lexer::tokenize;
use crate::parser::Parser;
use crate::token::{Token, TokenKind};
use expert_base::Span;
use expert_kernel::{Fact, Query, Rule, TriState};

/// Tokenizes and parses a complete program source.
pub fn parse_program(source: &str) -> ParseResult<(Vec<Rule>, Vec<Fact>, Vec<Query>)> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Ok((Vec::new(), Vec::new(), Vec::new()));
    }

    let lines = split_into_lines(tokens);

    let mut rules = Vec::new();
    let mut facts = Vec::new();
    let mut queries = Vec::new();
    let mut facts_line: Option<usize> = None;
    let mut queries_line: Option<usize> = None;

    for line_tokens in lines {
        let line = line_tokens[0].span.line;
        match &line_tokens[0].kind {
            TokenKind::Fact => {
                if facts_line.is_some() {
                    return Err(ParseError::new("multiple facts lines found", Span::new(line)));
                }
                facts_line = Some(line);
                let (letters, comment) = parse_letter_line(&line_tokens[1..], line, "facts")?;
                facts = letters
                    .into_iter()
                    .map(|letter| {
                        Fact::base(letter, TriState::True, Span::new(line), comment.clone())
                    })
                    .collect();
            }
            TokenKind::Query => {
                if queries_line.is_some() {
                    return Err(ParseError::new(
                        "multiple queries lines found",
                        Span::new(line),
                    ));
                }
                queries_line = Some(line);
                let (letters, comment) = parse_letter_line(&line_tokens[1..], line, "queries")?;
                queries = letters
                    .into_iter()
                    .map(|letter| Query::new(letter, Span::new(line), comment.clone()))
                    .collect();
            }
            _ => {
                let (expr_tokens, comment) = split_trailing_comment(&line_tokens);
                let expr = Parser::parse(expr_tokens, line)?;
                rules.push(Rule::new(expr, Span::new(line), comment));
            }
        }
    }

    if facts.is_empty() {
        return Err(ParseError::new("no facts line found", Span::new(0)));
    }
    if queries.is_empty() {
        return Err(ParseError::new("no queries line found", Span::new(0)));
    }

    Ok((rules, facts, queries))
}

fn split_into_lines(tokens: Vec<Token>) -> Vec<Vec<Token>> {
    let mut lines = Vec::new();
    let mut current = Vec::new();
    for tok in tokens {
        if tok.kind == TokenKind::NewLine {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
        } else {
            current.push(tok);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn parse_letter_line(
    tokens: &[Token],
    line: usize,
    what: &str,
) -> ParseResult<(Vec<char>, Option<String>)> {
    let mut letters = Vec::new();
    let mut comment = None;
    for tok in tokens {
        match &tok.kind {
            TokenKind::Var(c) => letters.push(*c),
            TokenKind::Comment(text) => comment = Some(text.clone()),
            other => {
                return Err(ParseError::new(
                    format!("unexpected token {:?} on {} line", other, what),
                    Span::new(line),
                ))
            }
        }
    }
    Ok((letters, comment))
}

fn split_trailing_comment(tokens: &[Token]) -> (&[Token], Option<String>) {
    match tokens.last() {
        Some(tok) => match &tok.kind {
            TokenKind::Comment(text) => (&tokens[..tokens.len() - 1], Some(text.clone())),
            _ => (tokens, None),
        },
        None => (tokens, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expert_kernel::Expr;

    #[test]
    fn parses_a_complete_scenario() {
        let (rules, facts, queries) = parse_program("A=>B\n=A\n?B").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].expr, Expr::imply(Expr::var('A'), Expr::var('B')));
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0].id, 'A');
        assert_eq!(facts[0].state, TriState::True);
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].id, 'B');
    }

    #[test]
    fn rejects_a_second_facts_line() {
        let err = parse_program("A=>B\n=A\n=C\n?B").unwrap_err();
        assert!(err.to_string().contains("multiple facts"));
    }

    #[test]
    fn requires_a_queries_line() {
        let err = parse_program("A=>B\n=A").unwrap_err();
        assert!(err.to_string().contains("queries"));
    }

    #[test]
    fn attaches_comments_to_facts_and_rules() {
        let (rules, facts, _) = parse_program("A=>B # drives the outcome\n=A # given\n?B").unwrap();
        assert_eq!(rules[0].comment.as_deref(), Some("drives the outcome"));
        assert_eq!(facts[0].comment.as_deref(), Some("given"));
    }
}
