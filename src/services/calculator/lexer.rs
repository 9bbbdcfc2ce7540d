use std::fmt;

use crate::error::{CalcError, CalcResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Num(f64),
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    /// `//`
    FloorDiv,
    Percent,
    /// `**` or `^`
    Pow,

    LParen,
    RParen,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Num(n) => write!(f, "{n}"),
            Token::Ident(name) => write!(f, "{name}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::FloorDiv => write!(f, "//"),
            Token::Percent => write!(f, "%"),
            Token::Pow => write!(f, "**"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
        }
    }
}

/// Split an expression into tokens.
///
/// Supports:
/// - decimal numbers with optional fraction and exponent (`12`, `.5`, `1.5e-3`)
/// - operators `+ - * / // % ** ^`
/// - parentheses and commas
/// - identifiers `[a-zA-Z_][a-zA-Z0-9_]*`, lowercased
/// - `π` as `pi` and `√` as `sqrt`
pub fn tokenize(input: &str) -> CalcResult<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let next = chars.get(i + 1).copied();
        let (token, width) = match c {
            '(' => (Token::LParen, 1),
            ')' => (Token::RParen, 1),
            ',' => (Token::Comma, 1),
            '+' => (Token::Plus, 1),
            '-' => (Token::Minus, 1),
            '%' => (Token::Percent, 1),
            '^' => (Token::Pow, 1),
            '*' if next == Some('*') => (Token::Pow, 2),
            '*' => (Token::Star, 1),
            '/' if next == Some('/') => (Token::FloorDiv, 2),
            '/' => (Token::Slash, 1),
            'π' => (Token::Ident("pi".to_string()), 1),
            '√' => (Token::Ident("sqrt".to_string()), 1),
            c if c.is_ascii_digit() || c == '.' => {
                let (value, len) = scan_number(&chars[i..])?;
                (Token::Num(value), len)
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let len = chars[i..]
                    .iter()
                    .take_while(|ch| ch.is_ascii_alphanumeric() || **ch == '_')
                    .count();
                let word: String = chars[i..i + len].iter().collect();
                (Token::Ident(word.to_lowercase()), len)
            }
            other => {
                return Err(CalcError::Parse(format!("unexpected character '{other}'")));
            }
        };

        out.push(token);
        i += width;
    }

    Ok(out)
}

/// Scan a number literal at the start of `chars`, returning its value and
/// the number of chars consumed.
///
/// An `e` only starts an exponent when digits follow, so `2e` lexes as the
/// number 2 and the constant `e`.
fn scan_number(chars: &[char]) -> CalcResult<(f64, usize)> {
    let digits = |from: usize| {
        chars[from..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count()
    };

    let mut len = digits(0);
    let mut mantissa_digits = len;

    if chars.get(len) == Some(&'.') {
        let frac = digits(len + 1);
        len += 1 + frac;
        mantissa_digits += frac;
    }

    if mantissa_digits == 0 {
        return Err(CalcError::Parse("lone '.'".to_string()));
    }

    if matches!(chars.get(len), Some('e' | 'E')) {
        let sign = usize::from(matches!(chars.get(len + 1), Some('+' | '-')));
        let exp = digits(len + 1 + sign);
        if exp > 0 {
            len += 1 + sign + exp;
        }
    }

    let text: String = chars[..len].iter().collect();
    text.parse::<f64>()
        .map(|v| (v, len))
        .map_err(|e| CalcError::Parse(format!("invalid number '{text}': {e}")))
}
