//! US volume/mass to metric conversion.

use super::quantity::parse_leading;
use regex::Regex;
use std::sync::LazyLock;

/// Grams per cup for common ingredients, matched by substring against the
/// lowercased ingredient name. Table order decides ties: the first key found
/// in the name wins.
pub const DENSITIES: &[(&str, f64)] = &[
    ("flour", 120.0),
    ("sugar", 200.0),
    ("butter", 227.0),
    ("rice", 185.0),
    ("oats", 90.0),
    ("milk", 240.0),
    ("water", 240.0),
    ("honey", 340.0),
    ("oil", 218.0),
];

/// Water-like density used when no table key matches.
pub const DEFAULT_GRAMS_PER_CUP: f64 = 240.0;

pub const GRAMS_PER_OUNCE: f64 = 28.35;
pub const GRAMS_PER_POUND: f64 = 453.59;
pub const ML_PER_TABLESPOON: f64 = 15.0;
pub const ML_PER_TEASPOON: f64 = 5.0;

static LEADING_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(cup|oz|ounce|lb|pound|tbsp|tablespoon|tsp|teaspoon)s?\b")
        .expect("Invalid unit pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    Grams,
    Millilitres,
}

impl MetricUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            MetricUnit::Grams => "g",
            MetricUnit::Millilitres => "ml",
        }
    }
}

pub fn grams_per_cup(ingredient_name: &str) -> f64 {
    let name = ingredient_name.to_lowercase();
    DENSITIES
        .iter()
        .find(|(key, _)| name.contains(key))
        .map(|(_, density)| *density)
        .unwrap_or(DEFAULT_GRAMS_PER_CUP)
}

/// Conversion factor and target unit for a matched unit token.
fn metric_factor(unit: &str, ingredient_name: &str) -> Option<(f64, MetricUnit)> {
    let factor = match unit.to_lowercase().as_str() {
        "cup" => (grams_per_cup(ingredient_name), MetricUnit::Grams),
        "oz" | "ounce" => (GRAMS_PER_OUNCE, MetricUnit::Grams),
        "lb" | "pound" => (GRAMS_PER_POUND, MetricUnit::Grams),
        "tbsp" | "tablespoon" => (ML_PER_TABLESPOON, MetricUnit::Millilitres),
        "tsp" | "teaspoon" => (ML_PER_TEASPOON, MetricUnit::Millilitres),
        _ => return None,
    };
    Some(factor)
}

/// Rewrite a leading `<quantity> <unit>` as whole grams or millilitres.
///
/// The converted value is truncated, the symbol follows it without a space
/// and the rest of the line is kept from right after the unit token. Lines
/// without a recognized unit come back unchanged.
pub fn to_metric(line: &str, ingredient_name: &str) -> String {
    parse_leading(line)
        .and_then(|(value, rest)| convert(value, rest, ingredient_name))
        .unwrap_or_else(|| line.to_string())
}

/// Convert `value` followed by the unit at the start of `rest`.
///
/// `value` is used at full precision. Returns `None` when `rest` does not
/// start with a recognized unit.
pub fn convert(value: f64, rest: &str, ingredient_name: &str) -> Option<String> {
    let captures = LEADING_UNIT.captures(rest)?;
    let (whole, unit) = (captures.get(0)?, captures.get(1)?);
    let (factor, metric_unit) = metric_factor(unit.as_str(), ingredient_name)?;

    let converted = (value * factor).trunc();
    Some(format!(
        "{converted:.0}{}{}",
        metric_unit.symbol(),
        &rest[whole.end()..]
    ))
}
