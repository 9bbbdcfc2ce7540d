//! Calculator module for evaluating math expressions
//!
//! Input flows through [`preprocess`], the lexer, the recursive-descent
//! parser and the tree-walking evaluator. Only numbers, operators and the
//! names in [`functions`] are understood; there is no way to reach anything
//! outside that table.

mod eval;
mod format;
pub mod functions;
mod lexer;
mod parser;
mod preprocess;

pub use format::format_number;
pub use parser::{BinaryOp, Expr};
pub use preprocess::preprocess;

use crate::error::{CalcError, CalcResult};

/// Parse and evaluate an expression, keeping the reason for failure.
pub fn try_evaluate(expr: &str) -> CalcResult<f64> {
    if expr.trim().is_empty() {
        return Err(CalcError::Empty);
    }
    let tokens = lexer::tokenize(expr)?;
    parser::parse(tokens)?.eval()
}

/// Evaluate a math expression and return the formatted result
/// Returns None if the expression is empty or invalid
pub fn evaluate(expr: &str) -> Option<String> {
    match try_evaluate(expr) {
        Ok(value) => Some(format_result(value)),
        Err(e) => {
            tracing::debug!(expr, error = %e, "evaluation failed");
            None
        }
    }
}

/// Preprocess raw user input, then evaluate it.
pub fn calculate(input: &str) -> Option<String> {
    evaluate(&preprocess(input))
}

/// Format a result for display
/// Removes unnecessary decimal places (e.g., 4.0 -> "4")
pub fn format_result(value: f64) -> String {
    format_number(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_math() {
        assert_eq!(evaluate("2+2").as_deref(), Some("4"));
        assert_eq!(evaluate("10 - 3").as_deref(), Some("7"));
        assert_eq!(evaluate("5 * 6").as_deref(), Some("30"));
        assert_eq!(evaluate("10/2").as_deref(), Some("5"));
    }

    #[test]
    fn test_complex_expressions() {
        assert_eq!(calculate("2^10").as_deref(), Some("1024"));
        assert_eq!(evaluate("sqrt(16)").as_deref(), Some("4"));
        assert_eq!(evaluate("(10 + 5) * 2").as_deref(), Some("30"));
        assert_eq!(evaluate("log(100)").as_deref(), Some("2"));
        assert_eq!(evaluate("ln(e)").as_deref(), Some("1"));
    }

    #[test]
    fn test_preprocessed_inputs() {
        assert_eq!(calculate("7(3+2)").as_deref(), Some("35"));
        assert_eq!(calculate("2sqrt(9)").as_deref(), Some("6"));
        assert_eq!(calculate("3×4÷2").as_deref(), Some("6"));
        assert_eq!(calculate("2^3").as_deref(), Some("8"));
        assert_eq!(calculate("(1+2)(3)").as_deref(), Some("9"));
    }

    #[test]
    fn test_names_with_digits() {
        assert_eq!(calculate("log10(100)").as_deref(), Some("2"));
        assert_eq!(calculate("log2(8)").as_deref(), Some("3"));
        assert_eq!(calculate("exp2(3)").as_deref(), Some("8"));
        assert_eq!(calculate("atan2(1,1)").as_deref(), Some("0.7853981634"));
        assert_eq!(calculate("2log10(1000)").as_deref(), Some("6"));
    }

    #[test]
    fn test_formatting() {
        let third = evaluate("1/3").unwrap();
        let digits = third.chars().filter(char::is_ascii_digit).count();
        assert!(digits <= 11, "{third}"); // leading zero + 10 significant
        assert_eq!(evaluate("1e-12").as_deref(), Some("0"));
        assert_eq!(evaluate("10**-12").as_deref(), Some("0"));
    }

    #[test]
    fn test_invalid_expressions() {
        assert_eq!(evaluate("hello"), None);
        assert_eq!(evaluate(""), None);
        assert_eq!(evaluate("   "), None);
        assert_eq!(evaluate("abc + def"), None);
        assert_eq!(calculate("2+"), None);
        assert_eq!(calculate("sqrt(-1)"), None);
        assert_eq!(calculate("1/0"), None);
    }

    #[test]
    fn test_huge_combinatorics_fail_fast() {
        assert!(matches!(
            try_evaluate("perm(10**18, 10**17)"),
            Err(CalcError::Domain(_))
        ));
        assert!(matches!(
            try_evaluate("comb(10**300, 10**299)"),
            Err(CalcError::Domain(_))
        ));
        assert_eq!(calculate("comb(10**300, 10**299)"), None);
    }

    #[test]
    fn test_long_flat_chain() {
        assert_eq!(calculate(&("1+".repeat(999) + "1")).as_deref(), Some("1000"));
        assert_eq!(calculate(&("1+".repeat(50_000) + "1")), None);
        assert_eq!(calculate(&format!("2{}", "(1)".repeat(50_000))), None);
    }

    #[test]
    fn test_try_evaluate_reports_kind() {
        assert!(matches!(try_evaluate(" "), Err(CalcError::Empty)));
        assert!(matches!(try_evaluate("sqrt(-1)"), Err(CalcError::Domain(_))));
        assert!(matches!(try_evaluate("os"), Err(CalcError::UnknownName(_))));
    }

    #[test]
    fn test_deterministic() {
        for expr in ["1/7", "sin(1)+cos(2)", "2**0.5", "factorial(20)"] {
            assert_eq!(evaluate(expr), evaluate(expr));
        }
    }
}
