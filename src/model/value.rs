//! Scalar value types shared by every node.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An optional scalar that remembers whether it was ever assigned.
///
/// The schema marks every `xsd:int` field (and the flat-field doubles) as
/// *unsettable*: "set to `0`" and "never set" are different states, and only the
/// former is written to XML. [`Unsettable::get`] still returns the type default for
/// an unset field, so callers that care must ask [`Unsettable::is_set`] first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unsettable<T>(Option<T>);

impl<T> Unsettable<T> {
    /// A field explicitly assigned `value`.
    pub const fn with(value: T) -> Self {
        Self(Some(value))
    }

    /// Assign `value` and mark the field set.
    pub fn set(&mut self, value: T) {
        self.0 = Some(value);
    }

    /// Clear the value; [`is_set`](Self::is_set) becomes `false`.
    pub fn unset(&mut self) {
        self.0 = None;
    }

    /// Whether a value was explicitly assigned, independent of what it is.
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Borrow the assigned value, if any.
    pub fn as_option(&self) -> Option<&T> {
        self.0.as_ref()
    }
}

impl<T: Copy + Default> Unsettable<T> {
    /// Current value, or `T::default()` when unset.
    pub fn get(&self) -> T {
        self.0.unwrap_or_default()
    }

    /// Current value, `None` when unset.
    pub fn value(&self) -> Option<T> {
        self.0
    }
}

impl<T> From<Option<T>> for Unsettable<T> {
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T> From<Unsettable<T>> for Option<T> {
    fn from(value: Unsettable<T>) -> Self {
        value.0
    }
}

/// Error returned for a string that is not an `xsd:decimal` literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid decimal literal: {0:?}")]
pub struct DecimalError(pub String);

/// An `xsd:decimal` value kept in its lexical form.
///
/// The literal is validated on construction and written back unchanged, so a
/// document round-trips without precision loss. Equality is numeric
/// (`1.50 == 1.5`, `-0 == 0`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Decimal(String);

impl Decimal {
    /// Parse a decimal literal. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> Result<Self, DecimalError> {
        let trimmed = text.trim();
        if is_decimal_literal(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(DecimalError(text.to_string()))
        }
    }

    /// Convert a finite `f64`. Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_finite() {
            // `Display` for f64 never uses exponent notation.
            Some(Self(format!("{}", value)))
        } else {
            None
        }
    }

    /// The literal as it will be written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        self.0.parse().unwrap_or(0.0)
    }

    /// Canonical form used for comparison: no leading `+`, no redundant zeros.
    fn canonical(&self) -> (bool, &str, &str) {
        let (negative, digits) = match self.0.as_bytes().first() {
            Some(b'-') => (true, &self.0[1..]),
            Some(b'+') => (false, &self.0[1..]),
            _ => (false, self.0.as_str()),
        };
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
        let int_part = int_part.trim_start_matches('0');
        let frac_part = frac_part.trim_end_matches('0');
        let is_zero = int_part.is_empty() && frac_part.is_empty();
        (negative && !is_zero, int_part, frac_part)
    }
}

fn is_decimal_literal(text: &str) -> bool {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };
    let digits_ok = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let has_digit = !int_part.is_empty() || frac_part.map_or(false, |f| !f.is_empty());
    has_digit && digits_ok(int_part) && frac_part.map_or(true, digits_ok)
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Decimal {
    type Error = DecimalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Decimal> for String {
    fn from(value: Decimal) -> Self {
        value.0
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
