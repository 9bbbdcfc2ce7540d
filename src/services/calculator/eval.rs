//! Tree-walking evaluation of [`Expr`] over `f64`.

use super::functions;
use super::parser::{BinaryOp, Expr};
use crate::error::{CalcError, CalcResult};

impl Expr {
    /// Evaluate the expression. Any non-finite intermediate is a domain error.
    pub fn eval(&self) -> CalcResult<f64> {
        let value = match self {
            Expr::Num(n) => *n,
            Expr::Name(name) => functions::constant(name)
                .ok_or_else(|| CalcError::UnknownName(name.clone()))?,
            Expr::Neg(inner) => -inner.eval()?,
            Expr::Binary { op, lhs, rhs } => apply(*op, lhs.eval()?, rhs.eval()?)?,
            Expr::Call { name, args } => {
                let args = args.iter().map(Expr::eval).collect::<CalcResult<Vec<_>>>()?;
                functions::call(name, &args)?
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::Domain("result out of range".to_string()))
        }
    }
}

fn apply(op: BinaryOp, lhs: f64, rhs: f64) -> CalcResult<f64> {
    match op {
        BinaryOp::Add => Ok(lhs + rhs),
        BinaryOp::Sub => Ok(lhs - rhs),
        BinaryOp::Mul => Ok(lhs * rhs),
        BinaryOp::Div => nonzero(rhs).map(|rhs| lhs / rhs),
        BinaryOp::FloorDiv => nonzero(rhs).map(|rhs| (lhs / rhs).floor()),
        BinaryOp::Mod => nonzero(rhs).map(|rhs| {
            // result takes the sign of the divisor
            let m = lhs % rhs;
            if m != 0.0 && (m < 0.0) != (rhs < 0.0) {
                m + rhs
            } else {
                m
            }
        }),
        BinaryOp::Pow => functions::power(lhs, rhs),
    }
}

fn nonzero(x: f64) -> CalcResult<f64> {
    if x == 0.0 {
        Err(CalcError::DivisionByZero)
    } else {
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::calculator::{lexer, parser};

    fn eval(s: &str) -> CalcResult<f64> {
        parser::parse(lexer::tokenize(s)?)?.eval()
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("2+3*4").unwrap(), 14.0);
        assert_eq!(eval("(2+3)*4").unwrap(), 20.0);
        assert_eq!(eval("10/4").unwrap(), 2.5);
        assert_eq!(eval("7//2").unwrap(), 3.0);
        assert_eq!(eval("-7//2").unwrap(), -4.0);
        assert_eq!(eval("-2**2").unwrap(), -4.0);
        assert_eq!(eval("2**3**2").unwrap(), 512.0);
        assert_eq!(eval("2**-1").unwrap(), 0.5);
    }

    #[test]
    fn test_modulo_sign() {
        assert_eq!(eval("7%3").unwrap(), 1.0);
        assert_eq!(eval("-7%3").unwrap(), 2.0);
        assert_eq!(eval("7%-3").unwrap(), -2.0);
    }

    #[test]
    fn test_names_and_calls() {
        assert_eq!(eval("2pi").unwrap(), 2.0 * std::f64::consts::PI);
        assert_eq!(eval("sqrt(16)+abs(-1)").unwrap(), 5.0);
        assert_eq!(eval("max(1, 2+3, 4)").unwrap(), 5.0);
        assert!(matches!(eval("foo"), Err(CalcError::UnknownName(_))));
        assert!(matches!(eval("foo(1)"), Err(CalcError::UnknownName(_))));
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(eval("1/0"), Err(CalcError::DivisionByZero)));
        assert!(matches!(eval("1//0"), Err(CalcError::DivisionByZero)));
        assert!(matches!(eval("1%0"), Err(CalcError::DivisionByZero)));
        assert!(matches!(eval("0**-1"), Err(CalcError::DivisionByZero)));
    }

    #[test]
    fn test_overflow_is_domain_error() {
        assert!(matches!(eval("10**400"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("exp(1000)"), Err(CalcError::Domain(_))));
    }
}
