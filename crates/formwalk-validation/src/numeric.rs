//! # Numericality
//!
//! Parses the submitted string once, then compares the parsed number
//! against the configured bounds in a fixed order:
//!
//! `odd` → `even` → `equal_to` → `less_than` → `less_than_or_equal_to`
//! → `greater_than` → `greater_than_or_equal_to`
//!
//! The first failing check wins. When the value does not parse, none of
//! the bound checks run.

use formwalk_core::{ErrorIndicator, SchemaError};

use crate::messages;
use crate::options::ValidationOptions;
use crate::validator::{Guard, Validator};

/// Numeric bound checks, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Bound {
    Odd,
    Even,
    EqualTo(f64),
    LessThan(f64),
    LessThanOrEqualTo(f64),
    GreaterThan(f64),
    GreaterThanOrEqualTo(f64),
}

impl Bound {
    fn holds(self, n: f64) -> bool {
        match self {
            Bound::Odd => n.rem_euclid(2.0) == 1.0,
            Bound::Even => n.rem_euclid(2.0) == 0.0,
            Bound::EqualTo(b) => n == b,
            Bound::LessThan(b) => n < b,
            Bound::LessThanOrEqualTo(b) => n <= b,
            Bound::GreaterThan(b) => n > b,
            Bound::GreaterThanOrEqualTo(b) => n >= b,
        }
    }

    fn message(self) -> ErrorIndicator {
        match self {
            Bound::Odd => ErrorIndicator::message(messages::ODD),
            Bound::Even => ErrorIndicator::message(messages::EVEN),
            Bound::EqualTo(b) => ErrorIndicator::Message(messages::equal_to(b)),
            Bound::LessThan(b) => ErrorIndicator::Message(messages::less_than(b)),
            Bound::LessThanOrEqualTo(b) => ErrorIndicator::Message(messages::less_than_or_equal_to(b)),
            Bound::GreaterThan(b) => ErrorIndicator::Message(messages::greater_than(b)),
            Bound::GreaterThanOrEqualTo(b) => {
                ErrorIndicator::Message(messages::greater_than_or_equal_to(b))
            }
        }
    }
}

/// Collect the configured bounds in evaluation order.
fn bounds(options: &ValidationOptions) -> Result<Vec<Bound>, SchemaError> {
    if options.odd && options.even {
        return Err(SchemaError::invalid_option(
            "numericality",
            "odd and even cannot both be required",
        ));
    }

    let mut bounds = Vec::new();
    if options.odd {
        bounds.push(Bound::Odd);
    }
    if options.even {
        bounds.push(Bound::Even);
    }
    let numeric: [(Option<f64>, fn(f64) -> Bound, &str); 5] = [
        (options.equal_to, Bound::EqualTo, "equal_to"),
        (options.less_than, Bound::LessThan, "less_than"),
        (options.less_than_or_equal_to, Bound::LessThanOrEqualTo, "less_than_or_equal_to"),
        (options.greater_than, Bound::GreaterThan, "greater_than"),
        (options.greater_than_or_equal_to, Bound::GreaterThanOrEqualTo, "greater_than_or_equal_to"),
    ];
    for (value, make, name) in numeric {
        if let Some(b) = value {
            if !b.is_finite() {
                return Err(SchemaError::invalid_option(
                    "numericality",
                    format!("{name} must be a finite number"),
                ));
            }
            bounds.push(make(b));
        }
    }
    Ok(bounds)
}

/// Parse `value` as the configured kind of number.
fn parse(value: &str, only_integer: bool) -> Result<f64, ErrorIndicator> {
    let trimmed = value.trim();
    if only_integer {
        if let Ok(n) = trimmed.parse::<i64>() {
            return Ok(n as f64);
        }
        return match parse_float(trimmed) {
            Some(_) => Err(ErrorIndicator::message(messages::NOT_AN_INTEGER)),
            None => Err(ErrorIndicator::message(messages::NOT_A_NUMBER)),
        };
    }
    parse_float(trimmed).ok_or_else(|| ErrorIndicator::message(messages::NOT_A_NUMBER))
}

/// Finite decimal numbers only; `inf` and `NaN` spellings are rejected.
fn parse_float(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// The value must be a number, and satisfy every configured bound.
///
/// # Errors
///
/// Returns [`SchemaError::InvalidOption`] if both `odd` and `even` are set
/// or a bound is not finite.
pub fn numericality(options: ValidationOptions) -> Result<Validator, SchemaError> {
    let bounds = bounds(&options)?;
    let only_integer = options.only_integer;
    Ok(Guard::new(&options).wrap("numericality", move |value, _| {
        let n = parse(value, only_integer)?;
        match bounds.iter().find(|bound| !bound.holds(n)) {
            Some(bound) => Err(bound.message()),
            None => Ok(()),
        }
    }))
}
