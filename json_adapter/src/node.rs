//! Document nodes
//!
//! A node is `{document, mount, address}`; every operation re-locates its
//! value from the mounted root, so a node is cheap to construct, never goes
//! stale, and enumeration restarts by asking for a fresh sequence.

use std::io::Cursor;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use repo_api::{
    Address, BinaryStream, Children, Decimal, Node, NodeError, NodeHandle, NodeVisitor,
    ScalarValue, TypeKind,
};

use crate::value::DocValue;

/// Reserved object field surfaced as a node's cross-reference identifier
pub const REFERENCE_FIELD: &str = "reference";

/// A node of a mounted document tree
#[derive(Debug, Clone)]
pub struct JsonNode {
    document: Arc<DocValue>,
    mount: Address,
    address: Address,
}

impl JsonNode {
    pub(crate) fn new(document: Arc<DocValue>, mount: Address, address: Address) -> Self {
        JsonNode {
            document,
            mount,
            address,
        }
    }

    /// Re-locates this node's value in the mounted document
    fn value(&self) -> Option<&DocValue> {
        let segments = self.address.relative_to(&self.mount)?;
        self.document.locate(segments)
    }

    /// The scalar payload owed to a typed accessor, or the error it owes
    fn typed_scalar(&self, requested: TypeKind) -> Result<ScalarValue, NodeError> {
        match self.value() {
            Some(value) => match value.to_scalar() {
                Some(scalar) => Ok(scalar),
                None => Err(NodeError::TypeMismatch {
                    address: self.address.clone(),
                    requested,
                    actual: value.kind(),
                }),
            },
            None => Ok(ScalarValue::Undefined),
        }
    }

    fn child_node(&self, segment: String) -> NodeHandle {
        Box::new(JsonNode::new(
            self.document.clone(),
            self.mount.clone(),
            self.address.resolve(segment),
        ))
    }
}

impl Node for JsonNode {
    fn address(&self) -> &Address {
        &self.address
    }

    fn type_of(&self) -> TypeKind {
        self.value().map(DocValue::kind).unwrap_or(TypeKind::Undefined)
    }

    fn child(&self, name: &str) -> Result<Option<NodeHandle>, NodeError> {
        match self.value() {
            Some(DocValue::Object(fields)) => Ok(fields
                .iter()
                .any(|(key, _)| key == name)
                .then(|| self.child_node(name.to_string()))),
            Some(DocValue::Array(items)) => match name.parse::<usize>() {
                Ok(index) if index < items.len() => Ok(Some(self.child_node(index.to_string()))),
                _ => Ok(None),
            },
            _ => Ok(None),
        }
    }

    fn children(&self) -> Children {
        Box::new(JsonChildren {
            document: self.document.clone(),
            mount: self.mount.clone(),
            parent: self.address.clone(),
            next_index: 0,
        })
    }

    fn reference(&self) -> String {
        match self.value().and_then(|value| value.field(REFERENCE_FIELD)) {
            Some(DocValue::String(id)) => id.clone(),
            _ => String::new(),
        }
    }

    fn as_string(&self) -> Result<Option<String>, NodeError> {
        match self.value() {
            Some(value) => Ok(value.to_scalar().and_then(|scalar| scalar.display())),
            None => Ok(None),
        }
    }

    fn as_boolean(&self) -> Result<bool, NodeError> {
        self.typed_scalar(TypeKind::Boolean)?
            .try_boolean(&self.address)
    }

    fn as_long(&self) -> Result<i64, NodeError> {
        self.typed_scalar(TypeKind::Long)?.try_long(&self.address)
    }

    fn as_double(&self) -> Result<f64, NodeError> {
        self.typed_scalar(TypeKind::Double)?
            .try_double(&self.address)
    }

    fn as_decimal(&self) -> Result<Decimal, NodeError> {
        self.typed_scalar(TypeKind::Decimal)?
            .try_decimal(&self.address)
    }

    fn as_date(&self) -> Result<NaiveDate, NodeError> {
        self.typed_scalar(TypeKind::Date)?.try_date(&self.address)
    }

    fn as_datetime(&self) -> Result<DateTime<Utc>, NodeError> {
        self.typed_scalar(TypeKind::DateTime)?
            .try_datetime(&self.address)
    }

    fn as_binary(&self) -> Result<BinaryStream, NodeError> {
        let bytes = self
            .typed_scalar(TypeKind::Binary)?
            .try_binary(&self.address)?;
        Ok(Box::new(Cursor::new(bytes)))
    }

    fn accept(&self, visitor: &mut dyn NodeVisitor) -> Result<(), NodeError> {
        match self.type_of() {
            TypeKind::Object => visitor.visit_object(self),
            TypeKind::Array => visitor.visit_array(self),
            _ => visitor.visit_scalar(self),
        }
    }
}

/// Lazy child enumeration over an object's field list or an array's
/// elements; holds only the next position
struct JsonChildren {
    document: Arc<DocValue>,
    mount: Address,
    parent: Address,
    next_index: usize,
}

impl Iterator for JsonChildren {
    type Item = Result<NodeHandle, NodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let segments = self.parent.relative_to(&self.mount)?;
        let parent = self.document.locate(segments)?;

        let segment = match parent {
            DocValue::Object(fields) => fields.get(self.next_index)?.0.clone(),
            DocValue::Array(items) => {
                if self.next_index >= items.len() {
                    return None;
                }
                self.next_index.to_string()
            }
            _ => return None,
        };

        self.next_index += 1;
        Some(Ok(Box::new(JsonNode::new(
            self.document.clone(),
            self.mount.clone(),
            self.parent.resolve(segment),
        ))))
    }
}
