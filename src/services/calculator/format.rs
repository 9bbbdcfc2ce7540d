/// Significant digits kept for non-integral results.
const SIGNIFICANT_DIGITS: i32 = 10;

/// Anything smaller than this in magnitude is shown as zero.
const ZERO_THRESHOLD: f64 = 1e-10;

/// Format a floating-point number for display
///
/// Integral values print without a fractional part (4.0 -> "4"), tiny values
/// collapse to "0", everything else uses up to 10 significant digits in
/// `%g` style, switching to scientific notation for very large or very small
/// magnitudes.
pub fn format_number(value: f64) -> String {
    if value == 0.0 || value.abs() < ZERO_THRESHOLD {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }

    // Round to the wanted precision first; the exponent must come from the
    // rounded value so 9999999999.99 switches to scientific notation.
    let sci = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
