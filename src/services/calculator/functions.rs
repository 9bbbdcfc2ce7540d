//! The fixed namespace of constants and functions expressions may use.
//!
//! Mirrors the scalar part of Python's `math` module plus `abs`, `round`,
//! `min`, `max` and `pow`. `ln` is the natural log; `log` and `log10` are
//! base 10, with `log(x, base)` for anything else.

use std::f64::consts;

use crate::error::{CalcError, CalcResult};

/// Largest n for which n! fits in an f64.
const MAX_FACTORIAL: f64 = 170.0;

/// Every name callable as a function.
pub const FUNCTIONS: &[&str] = &[
    "abs", "acos", "acosh", "asin", "asinh", "atan", "atan2", "atanh", "cbrt", "ceil", "comb",
    "copysign", "cos", "cosh", "degrees", "exp", "exp2", "expm1", "fabs", "factorial", "floor",
    "fmod", "gcd", "hypot", "isqrt", "lcm", "ldexp", "ln", "log", "log10", "log1p", "log2", "max",
    "min", "perm", "pow", "radians", "round", "sin", "sinh", "sqrt", "tan", "tanh", "trunc",
];

/// Look up a named constant.
pub fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(consts::PI),
        "e" => Some(consts::E),
        "tau" => Some(consts::TAU),
        _ => None,
    }
}

/// Apply a named function to already-evaluated arguments.
pub fn call(name: &str, args: &[f64]) -> CalcResult<f64> {
    match name {
        "sin" => Ok(one(name, args)?.sin()),
        "cos" => Ok(one(name, args)?.cos()),
        "tan" => Ok(one(name, args)?.tan()),
        "asin" => in_range(name, one(name, args)?, -1.0, 1.0).map(f64::asin),
        "acos" => in_range(name, one(name, args)?, -1.0, 1.0).map(f64::acos),
        "atan" => Ok(one(name, args)?.atan()),
        "atan2" => {
            let (y, x) = two(name, args)?;
            Ok(y.atan2(x))
        }
        "sinh" => Ok(one(name, args)?.sinh()),
        "cosh" => Ok(one(name, args)?.cosh()),
        "tanh" => Ok(one(name, args)?.tanh()),
        "asinh" => Ok(one(name, args)?.asinh()),
        "acosh" => {
            let x = one(name, args)?;
            require(name, x >= 1.0)?;
            Ok(x.acosh())
        }
        "atanh" => {
            let x = one(name, args)?;
            require(name, x.abs() < 1.0)?;
            Ok(x.atanh())
        }

        "sqrt" => {
            let x = one(name, args)?;
            require(name, x >= 0.0)?;
            Ok(x.sqrt())
        }
        "cbrt" => Ok(one(name, args)?.cbrt()),
        "exp" => Ok(one(name, args)?.exp()),
        "exp2" => Ok(one(name, args)?.exp2()),
        "expm1" => Ok(one(name, args)?.exp_m1()),
        "ln" => positive(name, one(name, args)?).map(f64::ln),
        "log10" => positive(name, one(name, args)?).map(f64::log10),
        "log2" => positive(name, one(name, args)?).map(f64::log2),
        "log1p" => {
            let x = one(name, args)?;
            require(name, x > -1.0)?;
            Ok(x.ln_1p())
        }
        "log" => match args {
            [x] => positive(name, *x).map(f64::log10),
            [x, base] => {
                let x = positive(name, *x)?;
                let base = positive(name, *base)?;
                if base == 1.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(x.ln() / base.ln())
            }
            _ => Err(arity(name, "1 or 2", args.len())),
        },

        "ceil" => Ok(one(name, args)?.ceil()),
        "floor" => Ok(one(name, args)?.floor()),
        "trunc" => Ok(one(name, args)?.trunc()),
        "abs" | "fabs" => Ok(one(name, args)?.abs()),
        "round" => match args {
            [x] => Ok(round_half_even(*x)),
            [x, digits] => {
                let digits = integer(name, *digits)?;
                let scale = 10f64.powi(digits as i32);
                Ok(round_half_even(x * scale) / scale)
            }
            _ => Err(arity(name, "1 or 2", args.len())),
        },
        "min" => at_least_one(name, args).map(|xs| xs.iter().copied().fold(f64::INFINITY, f64::min)),
        "max" => {
            at_least_one(name, args).map(|xs| xs.iter().copied().fold(f64::NEG_INFINITY, f64::max))
        }
        "pow" => {
            let (x, y) = two(name, args)?;
            power(x, y)
        }
        "copysign" => {
            let (x, y) = two(name, args)?;
            Ok(x.copysign(y))
        }
        "fmod" => {
            let (x, y) = two(name, args)?;
            require(name, y != 0.0)?;
            Ok(x % y)
        }
        "hypot" => Ok(args.iter().map(|x| x * x).sum::<f64>().sqrt()),
        "ldexp" => {
            let (x, i) = two(name, args)?;
            Ok(x * 2f64.powi(integer(name, i)? as i32))
        }
        "degrees" => Ok(one(name, args)?.to_degrees()),
        "radians" => Ok(one(name, args)?.to_radians()),

        "factorial" => {
            let n = natural(name, one(name, args)?)?;
            if n > MAX_FACTORIAL {
                return Err(CalcError::Domain("factorial() result too large".to_string()));
            }
            Ok((2..=n as u64).map(|k| k as f64).product())
        }
        "isqrt" => Ok(natural(name, one(name, args)?)?.sqrt().floor()),
        "gcd" => args.iter().try_fold(0.0, |acc, &x| -> CalcResult<f64> {
            Ok(gcd(acc, integer(name, x)?.abs()))
        }),
        "lcm" => args.iter().try_fold(1.0, |acc, &x| -> CalcResult<f64> {
            let x = integer(name, x)?.abs();
            if acc == 0.0 || x == 0.0 {
                Ok(0.0)
            } else {
                Ok(acc / gcd(acc, x) * x)
            }
        }),
        "comb" => {
            let (n, k) = two(name, args)?;
            let (n, k) = (natural(name, n)?, natural(name, k)?);
            if k > n {
                return Ok(0.0);
            }
            let k = k.min(n - k);
            (0..k as u64)
                .try_fold(1.0, |acc, i| finite(name, acc * (n - i as f64) / (i as f64 + 1.0)))
                .map(f64::round)
        }
        "perm" => match args {
            [n] => call("factorial", &[*n]),
            [n, k] => {
                let (n, k) = (natural(name, *n)?, natural(name, *k)?);
                if k > n {
                    return Ok(0.0);
                }
                (0..k as u64).try_fold(1.0, |acc, i| finite(name, acc * (n - i as f64)))
            }
            _ => Err(arity(name, "1 or 2", args.len())),
        },

        _ => Err(CalcError::UnknownName(name.to_string())),
    }
}

/// `x ** y` with Python's rules for the cases f64 would quietly accept.
pub fn power(x: f64, y: f64) -> CalcResult<f64> {
    if x == 0.0 && y < 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    if x < 0.0 && y.fract() != 0.0 {
        return Err(CalcError::Domain("fractional power of a negative number".to_string()));
    }
    Ok(x.powf(y))
}

fn arity(name: &str, expected: &'static str, got: usize) -> CalcError {
    CalcError::Arity {
        name: name.to_string(),
        expected,
        got,
    }
}

fn one(name: &str, args: &[f64]) -> CalcResult<f64> {
    match args {
        [x] => Ok(*x),
        _ => Err(arity(name, "1", args.len())),
    }
}

fn two(name: &str, args: &[f64]) -> CalcResult<(f64, f64)> {
    match args {
        [x, y] => Ok((*x, *y)),
        _ => Err(arity(name, "2", args.len())),
    }
}

fn at_least_one<'a>(name: &str, args: &'a [f64]) -> CalcResult<&'a [f64]> {
    if args.is_empty() {
        return Err(arity(name, "at least 1", 0));
    }
    Ok(args)
}

fn require(name: &str, ok: bool) -> CalcResult<()> {
    if ok {
        Ok(())
    } else {
        Err(CalcError::Domain(format!("{name}() argument out of domain")))
    }
}

fn in_range(name: &str, x: f64, lo: f64, hi: f64) -> CalcResult<f64> {
    require(name, (lo..=hi).contains(&x))?;
    Ok(x)
}

fn positive(name: &str, x: f64) -> CalcResult<f64> {
    require(name, x > 0.0)?;
    Ok(x)
}

fn integer(name: &str, x: f64) -> CalcResult<f64> {
    if x.fract() != 0.0 || !x.is_finite() {
        return Err(CalcError::Domain(format!("{name}() only accepts integral values")));
    }
    Ok(x)
}

fn natural(name: &str, x: f64) -> CalcResult<f64> {
    let x = integer(name, x)?;
    require(name, x >= 0.0)?;
    Ok(x)
}

/// Stop a running product as soon as it leaves the f64 range.
fn finite(name: &str, x: f64) -> CalcResult<f64> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(CalcError::Domain(format!("{name}() result too large")))
    }
}

fn gcd(mut a: f64, mut b: f64) -> f64 {
    while b != 0.0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Round to the nearest integer, ties to even (Python's `round`).
fn round_half_even(x: f64) -> f64 {
    let rounded = x.round();
    if (x - x.trunc()).abs() == 0.5 {
        2.0 * (x / 2.0).round()
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_constants() {
        assert_eq!(constant("pi"), Some(consts::PI));
        assert_eq!(constant("e"), Some(consts::E));
        assert_eq!(constant("sqrt"), None);
        assert_eq!(constant("os"), None);
    }

    #[test]
    fn test_logs() {
        assert!(approx(call("log", &[100.0]).unwrap(), 2.0));
        assert!(approx(call("log10", &[1000.0]).unwrap(), 3.0));
        assert!(approx(call("ln", &[consts::E]).unwrap(), 1.0));
        assert!(approx(call("log", &[8.0, 2.0]).unwrap(), 3.0));
        assert!(matches!(call("log", &[0.0]), Err(CalcError::Domain(_))));
        assert!(matches!(call("ln", &[-1.0]), Err(CalcError::Domain(_))));
    }

    #[test]
    fn test_domain_errors() {
        assert!(matches!(call("sqrt", &[-1.0]), Err(CalcError::Domain(_))));
        assert!(matches!(call("asin", &[2.0]), Err(CalcError::Domain(_))));
        assert!(matches!(call("factorial", &[-1.0]), Err(CalcError::Domain(_))));
        assert!(matches!(call("factorial", &[2.5]), Err(CalcError::Domain(_))));
        assert!(matches!(call("fmod", &[1.0, 0.0]), Err(CalcError::Domain(_))));
    }

    #[test]
    fn test_arity() {
        assert!(matches!(call("sqrt", &[1.0, 2.0]), Err(CalcError::Arity { .. })));
        assert!(matches!(call("max", &[]), Err(CalcError::Arity { .. })));
        assert!(matches!(call("pow", &[2.0]), Err(CalcError::Arity { .. })));
    }

    #[test]
    fn test_builtins() {
        assert_eq!(call("abs", &[-3.0]).unwrap(), 3.0);
        assert_eq!(call("min", &[3.0, 1.0, 2.0]).unwrap(), 1.0);
        assert_eq!(call("max", &[3.0, 1.0, 2.0]).unwrap(), 3.0);
        assert_eq!(call("pow", &[2.0, 10.0]).unwrap(), 1024.0);
        assert_eq!(call("round", &[2.5]).unwrap(), 2.0);
        assert_eq!(call("round", &[3.5]).unwrap(), 4.0);
        assert_eq!(call("round", &[-2.5]).unwrap(), -2.0);
        assert!(approx(call("round", &[3.14159, 2.0]).unwrap(), 3.14));
    }

    #[test]
    fn test_integer_functions() {
        assert_eq!(call("factorial", &[5.0]).unwrap(), 120.0);
        assert_eq!(call("factorial", &[0.0]).unwrap(), 1.0);
        assert_eq!(call("gcd", &[12.0, 18.0]).unwrap(), 6.0);
        assert_eq!(call("lcm", &[4.0, 6.0]).unwrap(), 12.0);
        assert_eq!(call("comb", &[5.0, 2.0]).unwrap(), 10.0);
        assert_eq!(call("perm", &[5.0, 2.0]).unwrap(), 20.0);
        assert_eq!(call("isqrt", &[17.0]).unwrap(), 4.0);
    }

    #[test]
    fn test_combinatorics_overflow() {
        assert!(matches!(call("perm", &[1e18, 1e17]), Err(CalcError::Domain(_))));
        assert!(matches!(call("comb", &[1e300, 1e299]), Err(CalcError::Domain(_))));
        assert!(matches!(call("comb", &[4000.0, 2000.0]), Err(CalcError::Domain(_))));
        assert_eq!(call("comb", &[1e18, 1.0]).unwrap(), 1e18);
        assert_eq!(call("perm", &[1e18, 0.0]).unwrap(), 1.0);
    }

    #[test]
    fn test_power_rules() {
        assert!(matches!(power(0.0, -1.0), Err(CalcError::DivisionByZero)));
        assert!(matches!(power(-8.0, 0.5), Err(CalcError::Domain(_))));
        assert_eq!(power(-2.0, 3.0).unwrap(), -8.0);
    }

    #[test]
    fn test_unknown() {
        assert!(matches!(call("eval", &[1.0]), Err(CalcError::UnknownName(_))));
    }

    #[test]
    fn test_function_list_is_callable() {
        for name in FUNCTIONS {
            let result = call(name, &[1.0]).or_else(|_| call(name, &[1.0, 1.0]));
            assert!(
                !matches!(result, Err(CalcError::UnknownName(_))),
                "{name} is listed but not implemented"
            );
        }
    }
}
