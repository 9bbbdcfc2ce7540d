//! Recursive-descent parser producing an [`Expr`] tree.
//!
//! Precedence, lowest first:
//! - `parse_expr`: `+`, `-`
//! - `parse_term`: `*`, `/`, `//`, `%` and implicit multiplication
//! - `parse_unary`: prefix `+`, `-`
//! - `parse_power`: `**` (right associative, so `-2**2 == -4`)
//! - `parse_primary`: numbers, names, calls, parentheses

use super::lexer::Token;
use crate::error::{CalcError, CalcResult};

/// Nesting limit for parentheses and prefix operators.
const MAX_DEPTH: usize = 200;

/// Limit on binary operators, explicit or implicit, in one expression.
/// Chains like `1+1+...` nest one level per operator once parsed.
const MAX_OPERATORS: usize = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    /// A bare name, resolved against the constant table at evaluation time
    Name(String),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

/// Parse a token stream into a single expression.
pub fn parse(tokens: Vec<Token>) -> CalcResult<Expr> {
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        operators: 0,
    };
    let expr = parser.parse_expr()?;

    match parser.peek() {
        None => Ok(expr),
        Some(extra) => Err(CalcError::Parse(format!("unexpected '{extra}'"))),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    operators: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, want: Token) -> CalcResult<()> {
        match self.next() {
            Some(ref got) if *got == want => Ok(()),
            Some(got) => Err(CalcError::Parse(format!("expected '{want}', found '{got}'"))),
            None => Err(CalcError::Parse(format!("expected '{want}' at end of input"))),
        }
    }

    fn enter(&mut self) -> CalcResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::Parse("expression nested too deeply".to_string()));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn binary(&mut self, op: BinaryOp, lhs: Expr, rhs: Expr) -> CalcResult<Expr> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(CalcError::Parse("expression too long".to_string()));
        }
        Ok(Expr::binary(op, lhs, rhs))
    }

    fn parse_expr(&mut self) -> CalcResult<Expr> {
        let mut lhs = self.parse_term()?;

        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.parse_term()?;
            lhs = self.binary(op, lhs, rhs)?;
        }
    }

    fn parse_term(&mut self) -> CalcResult<Expr> {
        let mut lhs = self.parse_unary()?;

        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::FloorDiv) => BinaryOp::FloorDiv,
                Some(Token::Percent) => BinaryOp::Mod,
                // An operand directly after an operand: `2pi`, `(1)(2)`, `3 sin(x)`
                Some(Token::Num(_) | Token::Ident(_) | Token::LParen) => {
                    let rhs = self.parse_power()?;
                    lhs = self.binary(BinaryOp::Mul, lhs, rhs)?;
                    continue;
                }
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.parse_unary()?;
            lhs = self.binary(op, lhs, rhs)?;
        }
    }

    fn parse_unary(&mut self) -> CalcResult<Expr> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.enter()?;
                let operand = self.parse_unary()?;
                self.leave();
                Ok(Expr::Neg(Box::new(operand)))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.enter()?;
                let operand = self.parse_unary()?;
                self.leave();
                Ok(operand)
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> CalcResult<Expr> {
        let base = self.parse_primary()?;

        if self.peek() == Some(&Token::Pow) {
            self.pos += 1;
            self.enter()?;
            let exponent = self.parse_unary()?;
            self.leave();
            return self.binary(BinaryOp::Pow, base, exponent);
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> CalcResult<Expr> {
        match self.next() {
            Some(Token::Num(n)) => Ok(Expr::Num(n)),
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::LParen) {
                    self.pos += 1;
                    let args = self.parse_args()?;
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Name(name))
                }
            }
            Some(Token::LParen) => {
                self.enter()?;
                let inner = self.parse_expr()?;
                self.leave();
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(other) => Err(CalcError::Parse(format!("unexpected '{other}'"))),
            None => Err(CalcError::Parse("unexpected end of input".to_string())),
        }
    }

    /// Parse call arguments after the opening parenthesis, consuming the
    /// closing one.
    fn parse_args(&mut self) -> CalcResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.pos += 1;
            return Ok(args);
        }

        self.enter()?;
        loop {
            args.push(self.parse_expr()?);
            match self.next() {
                Some(Token::Comma) => continue,
                Some(Token::RParen) => break,
                Some(other) => {
                    return Err(CalcError::Parse(format!("unexpected '{other}' in arguments")))
                }
                None => return Err(CalcError::Parse("unclosed '('".to_string())),
            }
        }
        self.leave();

        Ok(args)
    }
}
