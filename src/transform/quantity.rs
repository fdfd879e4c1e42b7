//! Leading-quantity grammar for ingredient lines.
//!
//! Recognized forms, tried in this order: mixed number (`1 1/2`), bare
//! fraction (`3/4`), decimal (`0.5`), integer (`2`).

use regex::Regex;
use std::sync::LazyLock;

const QUANTITY_PATTERN: &str = r"\d+\s+\d+/\d+|\d+/\d+|\d+\.\d+|\d+";

static LEADING_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^({QUANTITY_PATTERN})")).expect("Invalid quantity pattern")
});

/// Split a line into its leading quantity and the text after it.
///
/// Leading whitespace is ignored. Returns `None` if the line does not start
/// with a quantity or the quantity can't be evaluated (zero denominator).
pub fn parse_leading(line: &str) -> Option<(f64, &str)> {
    let line = line.trim_start();
    let matched = LEADING_QUANTITY.find(line)?;
    let value = parse_quantity(matched.as_str())?;
    Some((value, &line[matched.end()..]))
}

/// Evaluate a quantity token such as `1 1/2`, `3/4`, `0.5` or `2`.
pub fn parse_quantity(token: &str) -> Option<f64> {
    let mut parts = token.split_whitespace();
    let first = parts.next()?;

    match parts.next() {
        Some(fraction) => Some(first.parse::<f64>().ok()? + parse_fraction(fraction)?),
        None => parse_fraction(first),
    }
}

fn parse_fraction(token: &str) -> Option<f64> {
    match token.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.parse().ok()?;
            let denominator: f64 = denominator.parse().ok()?;
            if denominator == 0.0 {
                return None;
            }
            Some(numerator / denominator)
        }
        None => token.parse::<f64>().ok().filter(|value| value.is_finite()),
    }
}

/// Exact integers render without a decimal point. Anything else is rounded
/// to two decimal places, keeping at least one decimal digit (`2.999` is
/// `3.0`, not `3`).
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }

    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.1}")
    } else {
        format!("{rounded}")
    }
}
