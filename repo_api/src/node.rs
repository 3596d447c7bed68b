//! The node contract and visitor dispatch
//!
//! A node is a read-only projection over a live backend handle plus an
//! address. Constructing one is cheap and never materializes children;
//! navigation happens through [`Node::child`] and [`Node::children`], and
//! generic algorithms branch on shape through [`Node::accept`] without ever
//! touching adapter types.

use std::io::Read;

use chrono::{DateTime, NaiveDate, Utc};

use crate::{Address, Decimal, NodeError, TypeKind};

/// An owned, type-erased node
pub type NodeHandle = Box<dyn Node>;

/// A lazy, finite child sequence.
///
/// Each element is produced on demand and reflects backend state at the time
/// it is pulled; a fresh sequence is obtained by calling
/// [`Node::children`] again.
pub type Children = Box<dyn Iterator<Item = Result<NodeHandle, NodeError>>>;

/// An independent read stream over a binary scalar's content.
///
/// The caller owns the stream and must consume or drop it on every exit
/// path; the adapter retains no handle.
pub type BinaryStream = Box<dyn Read>;

/// The uniform, read-only, addressable unit of the tree abstraction.
///
/// A node is composite (object or array) or scalar, and its shape is fully
/// determined by its classification. Typed extraction is strict: only the
/// accessor matching [`Node::type_of`] succeeds, except [`Node::as_string`],
/// which is defined for every classification as a display fallback.
pub trait Node {
    /// Location of this node from its tree root
    fn address(&self) -> &Address;

    /// Last address segment, or the empty string at root
    fn name(&self) -> &str {
        self.address().name()
    }

    /// Classification of the current backend value.
    ///
    /// Recomputed on every call; the backing store is not assumed immutable.
    fn type_of(&self) -> TypeKind;

    /// True when child lookup is keyed by field name
    fn is_object(&self) -> bool {
        self.type_of() == TypeKind::Object
    }

    /// True when child lookup is keyed by 0-based position
    fn is_array(&self) -> bool {
        self.type_of() == TypeKind::Array
    }

    /// True when the node holds a single backend-native value
    fn is_scalar(&self) -> bool {
        self.type_of().is_scalar()
    }

    /// Looks a direct child up by key.
    ///
    /// A missing child is `Ok(None)`, never an error, so callers can tell
    /// absence from failure. Array-shaped nodes parse `name` as a
    /// non-negative index; scalar nodes always yield `Ok(None)`.
    fn child(&self, name: &str) -> Result<Option<NodeHandle>, NodeError>;

    /// Enumerates direct children lazily.
    ///
    /// Object nodes enumerate in the backend's declared field order, array
    /// nodes in index order; the sequence is empty for scalar nodes. Every
    /// call yields a fresh, restartable sequence.
    fn children(&self) -> Children;

    /// Best-effort cross-reference identifier.
    ///
    /// Surfaced from a reserved `reference` field where the backend has one;
    /// the empty string otherwise. Never validated or dereferenced here.
    fn reference(&self) -> String {
        String::new()
    }

    /// String rendering, defined for every classification.
    ///
    /// `Ok(None)` for `Undefined` scalars and for composite nodes; every
    /// other classification renders to `Ok(Some(_))`.
    fn as_string(&self) -> Result<Option<String>, NodeError>;

    /// Boolean value of a `Boolean` scalar
    fn as_boolean(&self) -> Result<bool, NodeError>;

    /// Integer value of a `Long` scalar
    fn as_long(&self) -> Result<i64, NodeError>;

    /// Floating-point value of a `Double` scalar
    fn as_double(&self) -> Result<f64, NodeError>;

    /// Decimal literal of a `Decimal` scalar
    fn as_decimal(&self) -> Result<Decimal, NodeError>;

    /// Calendar date of a `Date` scalar
    fn as_date(&self) -> Result<NaiveDate, NodeError>;

    /// Timestamp of a `DateTime` scalar
    fn as_datetime(&self) -> Result<DateTime<Utc>, NodeError>;

    /// Opens an independent byte stream over a `Binary` scalar's content
    fn as_binary(&self) -> Result<BinaryStream, NodeError>;

    /// Dispatches to the visitor handler matching this node's shape
    fn accept(&self, visitor: &mut dyn NodeVisitor) -> Result<(), NodeError>;
}

/// Shape dispatch for generic tree algorithms.
///
/// Passed to [`Node::accept`], which calls exactly one handler according to
/// the node's concrete shape. A handler returning `Err` aborts the visiting
/// process. Implementations typically recurse by calling `accept` on the
/// children of the node they are handed.
pub trait NodeVisitor {
    /// Called for composite nodes keyed by field name
    fn visit_object(&mut self, node: &dyn Node) -> Result<(), NodeError>;

    /// Called for composite nodes keyed by position
    fn visit_array(&mut self, node: &dyn Node) -> Result<(), NodeError>;

    /// Called for leaf nodes
    fn visit_scalar(&mut self, node: &dyn Node) -> Result<(), NodeError>;
}
