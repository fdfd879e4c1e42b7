//! Per-line ingredient rewriting for display: portion scaling and metric
//! conversion.
//!
//! Everything here is pure and infallible. Whenever a line can't be
//! understood it is returned as it was.

pub mod metric;
pub mod quantity;

pub use metric::{
    convert, grams_per_cup, to_metric, MetricUnit, DEFAULT_GRAMS_PER_CUP, DENSITIES,
};
pub use quantity::{format_quantity, parse_leading, parse_quantity};

/// Rewrite an ingredient line for display.
///
/// Scales the leading quantity by `multiplier`, then converts to metric if
/// `metric` is set. Conversion works on the full-precision scaled value, not
/// on the rounded display number. The ingredient name used for the density
/// lookup is the text following the leading quantity.
///
/// ```
/// use recipe_scrape::transform;
///
/// assert_eq!(transform("2 cups flour", 2.0, false), "4 cups flour");
/// assert_eq!(transform("1 1/2 cups flour", 1.0, true), "180g flour");
/// ```
pub fn transform(line: &str, multiplier: f64, metric: bool) -> String {
    if !metric {
        return scale_line(line, multiplier);
    }

    let Some((value, rest)) = parse_leading(line) else {
        return line.to_string();
    };

    let scaled = if is_valid_multiplier(multiplier) {
        value * multiplier
    } else {
        value
    };
    convert(scaled, rest, rest).unwrap_or_else(|| scale_line(line, multiplier))
}

fn is_valid_multiplier(multiplier: f64) -> bool {
    multiplier.is_finite() && multiplier > 0.0
}

/// Multiply the leading quantity of `line`, leaving the rest of the text as
/// it was. A multiplier of exactly 1 returns the line untouched, as does a
/// multiplier that isn't a positive finite number.
pub fn scale_line(line: &str, multiplier: f64) -> String {
    if multiplier == 1.0 || !is_valid_multiplier(multiplier) {
        return line.to_string();
    }

    match parse_leading(line) {
        Some((value, rest)) => format!("{}{}", format_quantity(value * multiplier), rest),
        None => line.to_string(),
    }
}
