//! Precedence-climbing parser for a single rule line's tokens.
//!
//! ## Precedence (tightest first)
//!
//! | Operator | Precedence | Associativity |
//! |----------|------------|----------------|
//! | `!`      | 6          | prefix         |
//! | `+`      | 5          | left           |
//! | `\|`     | 4          | left           |
//! | `^`      | 3          | left           |
//! | `=>`     | 2          | right          |
//! | `<=>`    | 1          | right          |

use crate::error::{ParseError, ParseResult};
use crate::token::{Token, TokenKind};
use expert_base::Span;
use expert_kernel::Expr;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
}

fn binary_prec(kind: &TokenKind) -> Option<(u8, Assoc)> {
    match kind {
        TokenKind::Iff => Some((1, Assoc::Right)),
        TokenKind::Imply => Some((2, Assoc::Right)),
        TokenKind::Xor => Some((3, Assoc::Left)),
        TokenKind::Or => Some((4, Assoc::Left)),
        TokenKind::And => Some((5, Assoc::Left)),
        _ => None,
    }
}

fn build_binary(kind: &TokenKind, lhs: Expr, rhs: Expr) -> Expr {
    match kind {
        TokenKind::And => Expr::and(lhs, rhs),
        TokenKind::Or => Expr::or(lhs, rhs),
        TokenKind::Xor => Expr::xor(lhs, rhs),
        TokenKind::Imply => Expr::imply(lhs, rhs),
        TokenKind::Iff => Expr::iff(lhs, rhs),
        _ => unreachable!("build_binary only called for tokens accepted by binary_prec"),
    }
}

/// Parses one rule's worth of tokens (no `NewLine`/`Comment`/`Fact`/`Query`
/// tokens among them) into a single [`Expr`], failing if anything is left
/// over once the expression is fully parsed.
pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    line: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token], line: usize) -> Parser<'t> {
        Parser { tokens, pos: 0, line }
    }

    pub fn parse(tokens: &'t [Token], line: usize) -> ParseResult<Expr> {
        let mut parser = Parser::new(tokens, line);
        let expr = parser.parse_expr(0)?;
        if parser.pos != parser.tokens.len() {
            return Err(ParseError::new(
                "unexpected tokens remaining after parsing rule",
                Span::new(line),
            ));
        }
        Ok(expr)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn here(&self) -> Span {
        self.peek().map(|t| t.span).unwrap_or(Span::new(self.line))
    }

    fn parse_expr(&mut self, min_prec: u8) -> ParseResult<Expr> {
        let mut lhs = self.parse_factor()?;

        while let Some(tok) = self.peek() {
            let (prec, assoc) = match binary_prec(&tok.kind) {
                Some(p) => p,
                None => break,
            };
            if prec < min_prec {
                break;
            }
            let kind = tok.kind.clone();
            self.pos += 1;
            let next_min = if assoc == Assoc::Left { prec + 1 } else { prec };
            let rhs = self.parse_expr(next_min)?;
            lhs = build_binary(&kind, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let tok = self
            .peek()
            .ok_or_else(|| ParseError::new("expected an expression", self.here()))?;

        match &tok.kind {
            TokenKind::Not => {
                self.pos += 1;
                let operand = self.parse_factor()?;
                Ok(Expr::not(operand))
            }
            TokenKind::Var(letter) => {
                let letter = *letter;
                self.pos += 1;
                Ok(Expr::var(letter))
            }
            TokenKind::LParen => {
                self.pos += 1;
                let inner = self.parse_expr(0)?;
                match self.peek() {
                    Some(t) if t.kind == TokenKind::RParen => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    _ => Err(ParseError::new("expected closing ')'", self.here())),
                }
            }
            other => Err(ParseError::new(
                format!("unexpected token '{:?}' in expression", other),
                self.here(),
            )),
        }
    }
}
