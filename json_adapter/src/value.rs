//! The closed parsed-value union
//!
//! The document parser's output is converted into this tagged union once, at
//! mount time. Classification is then an exhaustive match instead of
//! open-ended runtime type inspection, and object fields keep their declared
//! order.

use repo_api::{Decimal, ScalarValue, TypeKind};

/// A parsed document value
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    /// Explicit null
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer fitting in 64 bits
    Long(i64),
    /// Floating-point number
    Double(f64),
    /// Number carried as an exact decimal literal
    Decimal(Decimal),
    /// Textual value
    String(String),
    /// Raw byte payload
    Binary(Vec<u8>),
    /// Ordered element sequence
    Array(Vec<DocValue>),
    /// Field list in declared order; names are unique within one object
    Object(Vec<(String, DocValue)>),
}

impl DocValue {
    /// Classifies this value; the most specific scalar kind wins
    pub fn kind(&self) -> TypeKind {
        match self {
            DocValue::Null => TypeKind::Undefined,
            DocValue::Boolean(_) => TypeKind::Boolean,
            DocValue::Long(_) => TypeKind::Long,
            DocValue::Double(_) => TypeKind::Double,
            DocValue::Decimal(_) => TypeKind::Decimal,
            DocValue::String(_) => TypeKind::String,
            DocValue::Binary(_) => TypeKind::Binary,
            DocValue::Array(_) => TypeKind::Array,
            DocValue::Object(_) => TypeKind::Object,
        }
    }

    /// Looks a direct field up by name (objects only)
    pub fn field(&self, name: &str) -> Option<&DocValue> {
        match self {
            DocValue::Object(fields) => fields
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Walks `segments` down from this value.
    ///
    /// Object levels match segments against field names; array levels parse
    /// the segment as a 0-based index. Anything that does not resolve is
    /// `None`.
    pub fn locate(&self, segments: &[String]) -> Option<&DocValue> {
        let mut current = self;
        for segment in segments {
            current = match current {
                DocValue::Object(_) => current.field(segment)?,
                DocValue::Array(items) => {
                    let index: usize = segment.parse().ok()?;
                    items.get(index)?
                }
                _ => return None,
            };
        }
        Some(current)
    }

    /// Projects a leaf value onto the shared scalar payload; `None` for
    /// composites
    pub(crate) fn to_scalar(&self) -> Option<ScalarValue> {
        match self {
            DocValue::Null => Some(ScalarValue::Undefined),
            DocValue::Boolean(b) => Some(ScalarValue::Boolean(*b)),
            DocValue::Long(v) => Some(ScalarValue::Long(*v)),
            DocValue::Double(v) => Some(ScalarValue::Double(*v)),
            DocValue::Decimal(d) => Some(ScalarValue::Decimal(d.clone())),
            DocValue::String(s) => Some(ScalarValue::String(s.clone())),
            DocValue::Binary(bytes) => Some(ScalarValue::Binary(bytes.clone())),
            DocValue::Array(_) | DocValue::Object(_) => None,
        }
    }
}

impl From<serde_json::Value> for DocValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DocValue::Null,
            serde_json::Value::Bool(b) => DocValue::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    DocValue::Long(v)
                } else if let Some(v) = n.as_u64() {
                    // Integral but beyond i64: keep every digit.
                    DocValue::Decimal(Decimal::from(v))
                } else {
                    DocValue::Double(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => DocValue::String(s),
            serde_json::Value::Array(items) => {
                DocValue::Array(items.into_iter().map(DocValue::from).collect())
            }
            serde_json::Value::Object(fields) => DocValue::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, DocValue::from(value)))
                    .collect(),
            ),
        }
    }
}
