//! Scalar payloads and strict typed extraction
//!
//! Adapters project every backend-native leaf value into [`ScalarValue`] and
//! delegate the typed accessor family to it, so the mismatch rules cannot
//! drift between backends: the accessor matching the value's classification
//! succeeds, every other one fails with a type-mismatch error, and the string
//! rendering is the single universal fallback.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::{Address, NodeError, TypeKind};

/// A decimal literal failed syntactic validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid decimal literal: `{0}`")]
pub struct ParseDecimalError(pub String);

/// An arbitrary-precision decimal, kept in its lexical form.
///
/// The repository layer classifies values; it does not compute with them, so
/// a decimal is carried as its exact validated literal (optional sign,
/// digits, optional fraction, optional exponent) rather than through a
/// numeric tower that could lose precision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Decimal(String);

impl Decimal {
    /// The exact literal
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lossy conversion for callers that accept rounding
    pub fn to_f64(&self) -> f64 {
        self.0.parse().unwrap_or(f64::NAN)
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let mut i = 0;

        if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
            i += 1;
        }

        let int_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let int_digits = i - int_start;

        let mut frac_digits = 0;
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            let frac_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            frac_digits = i - frac_start;
        }

        if int_digits == 0 && frac_digits == 0 {
            return Err(ParseDecimalError(s.to_string()));
        }

        if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            i += 1;
            if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
                i += 1;
            }
            let exp_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i == exp_start {
                return Err(ParseDecimalError(s.to_string()));
            }
        }

        if i != bytes.len() {
            return Err(ParseDecimalError(s.to_string()));
        }

        Ok(Decimal(s.to_string()))
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(value.to_string())
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Decimal(value.to_string())
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let literal = String::deserialize(deserializer)?;
        literal.parse().map_err(serde::de::Error::custom)
    }
}

/// A backend-native leaf value, projected onto the classification vocabulary
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Textual value
    String(String),
    /// Boolean value
    Boolean(bool),
    /// 64-bit integer
    Long(i64),
    /// Floating-point value
    Double(f64),
    /// Decimal literal
    Decimal(Decimal),
    /// Calendar date
    Date(NaiveDate),
    /// Date with time of day
    DateTime(DateTime<Utc>),
    /// In-memory byte payload
    Binary(Vec<u8>),
    /// Null or absent value
    Undefined,
}

impl ScalarValue {
    /// The classification matching this payload
    pub fn kind(&self) -> TypeKind {
        match self {
            ScalarValue::String(_) => TypeKind::String,
            ScalarValue::Boolean(_) => TypeKind::Boolean,
            ScalarValue::Long(_) => TypeKind::Long,
            ScalarValue::Double(_) => TypeKind::Double,
            ScalarValue::Decimal(_) => TypeKind::Decimal,
            ScalarValue::Date(_) => TypeKind::Date,
            ScalarValue::DateTime(_) => TypeKind::DateTime,
            ScalarValue::Binary(_) => TypeKind::Binary,
            ScalarValue::Undefined => TypeKind::Undefined,
        }
    }

    /// Universal string rendering.
    ///
    /// Defined for every payload; `Undefined` yields `None` so callers can
    /// tell "no value" from an empty string. Binary payloads decode as lossy
    /// UTF-8.
    pub fn display(&self) -> Option<String> {
        match self {
            ScalarValue::String(s) => Some(s.clone()),
            ScalarValue::Boolean(b) => Some(b.to_string()),
            ScalarValue::Long(v) => Some(v.to_string()),
            ScalarValue::Double(v) => Some(v.to_string()),
            ScalarValue::Decimal(d) => Some(d.as_str().to_string()),
            ScalarValue::Date(d) => Some(d.to_string()),
            ScalarValue::DateTime(t) => Some(t.to_rfc3339()),
            ScalarValue::Binary(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            ScalarValue::Undefined => None,
        }
    }

    fn mismatch(&self, at: &Address, requested: TypeKind) -> NodeError {
        NodeError::TypeMismatch {
            address: at.clone(),
            requested,
            actual: self.kind(),
        }
    }

    /// Extracts a boolean, or fails with a type mismatch
    pub fn try_boolean(&self, at: &Address) -> Result<bool, NodeError> {
        match self {
            ScalarValue::Boolean(b) => Ok(*b),
            other => Err(other.mismatch(at, TypeKind::Boolean)),
        }
    }

    /// Extracts a 64-bit integer, or fails with a type mismatch
    pub fn try_long(&self, at: &Address) -> Result<i64, NodeError> {
        match self {
            ScalarValue::Long(v) => Ok(*v),
            other => Err(other.mismatch(at, TypeKind::Long)),
        }
    }

    /// Extracts a floating-point value, or fails with a type mismatch
    pub fn try_double(&self, at: &Address) -> Result<f64, NodeError> {
        match self {
            ScalarValue::Double(v) => Ok(*v),
            other => Err(other.mismatch(at, TypeKind::Double)),
        }
    }

    /// Extracts a decimal literal, or fails with a type mismatch
    pub fn try_decimal(&self, at: &Address) -> Result<Decimal, NodeError> {
        match self {
            ScalarValue::Decimal(d) => Ok(d.clone()),
            other => Err(other.mismatch(at, TypeKind::Decimal)),
        }
    }

    /// Extracts a calendar date, or fails with a type mismatch
    pub fn try_date(&self, at: &Address) -> Result<NaiveDate, NodeError> {
        match self {
            ScalarValue::Date(d) => Ok(*d),
            other => Err(other.mismatch(at, TypeKind::Date)),
        }
    }

    /// Extracts a timestamp, or fails with a type mismatch
    pub fn try_datetime(&self, at: &Address) -> Result<DateTime<Utc>, NodeError> {
        match self {
            ScalarValue::DateTime(t) => Ok(*t),
            other => Err(other.mismatch(at, TypeKind::DateTime)),
        }
    }

    /// Extracts the byte payload, or fails with a type mismatch
    pub fn try_binary(&self, at: &Address) -> Result<Vec<u8>, NodeError> {
        match self {
            ScalarValue::Binary(bytes) => Ok(bytes.clone()),
            other => Err(other.mismatch(at, TypeKind::Binary)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_accepts_valid_literals() {
        for literal in ["0", "-1", "+2", "3.25", "-0.5", ".5", "1.", "1e9", "2.5E-3", "10e+2"] {
            assert!(literal.parse::<Decimal>().is_ok(), "rejected {literal}");
        }
    }

    #[test]
    fn test_decimal_rejects_invalid_literals() {
        for literal in ["", "-", ".", "1.2.3", "e9", "1e", "1e+", "abc", "1 ", "0x10"] {
            assert!(literal.parse::<Decimal>().is_err(), "accepted {literal}");
        }
    }

    #[test]
    fn test_decimal_preserves_lexical_form() {
        let d: Decimal = "184467440737095516150.001".parse().unwrap();
        assert_eq!(d.as_str(), "184467440737095516150.001");
        assert_eq!(d.to_string(), "184467440737095516150.001");
    }

    #[test]
    fn test_kind_matches_payload() {
        assert_eq!(ScalarValue::Long(5).kind(), TypeKind::Long);
        assert_eq!(ScalarValue::Undefined.kind(), TypeKind::Undefined);
        assert_eq!(ScalarValue::Binary(vec![1]).kind(), TypeKind::Binary);
    }

    #[test]
    fn test_matching_accessor_succeeds() {
        let at = Address::root().resolve("n");
        assert_eq!(ScalarValue::Long(5).try_long(&at).unwrap(), 5);
        assert!(ScalarValue::Boolean(true).try_boolean(&at).unwrap());
        assert_eq!(
            ScalarValue::Binary(b"ab".to_vec()).try_binary(&at).unwrap(),
            b"ab"
        );
    }

    #[test]
    fn test_mismatched_accessor_fails_without_coercion() {
        let at = Address::root().resolve("n");
        let value = ScalarValue::String("5".to_string());

        let err = value.try_long(&at).unwrap_err();
        match err {
            NodeError::TypeMismatch {
                address,
                requested,
                actual,
            } => {
                assert_eq!(address, at);
                assert_eq!(requested, TypeKind::Long);
                assert_eq!(actual, TypeKind::String);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display_is_universal_except_undefined() {
        assert_eq!(ScalarValue::Long(8).display().unwrap(), "8");
        assert_eq!(ScalarValue::Boolean(false).display().unwrap(), "false");
        assert_eq!(
            ScalarValue::Binary(b"someText".to_vec()).display().unwrap(),
            "someText"
        );
        assert!(ScalarValue::Undefined.display().is_none());
    }

    #[test]
    fn test_undefined_rejects_every_typed_accessor() {
        let at = Address::root();
        let value = ScalarValue::Undefined;
        assert!(value.try_boolean(&at).is_err());
        assert!(value.try_long(&at).is_err());
        assert!(value.try_double(&at).is_err());
        assert!(value.try_decimal(&at).is_err());
        assert!(value.try_date(&at).is_err());
        assert!(value.try_datetime(&at).is_err());
        assert!(value.try_binary(&at).is_err());
    }
}
