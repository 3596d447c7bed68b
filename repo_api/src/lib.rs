//! # Repository API
//!
//! This crate defines the uniform, read-only node contract shared by every
//! tree backend.
//!
//! ## Philosophy
//!
//! - **One contract, many backends**: consumers navigate with [`Node`] and
//!   never see adapter types.
//! - **Fail loudly and precisely**: typed extraction never coerces; every
//!   failure carries the address and the attempted operation.
//! - **Projection, not materialization**: a node is a cheap view over a live
//!   backend handle, constructed on demand.
//!
//! ## Key Types
//!
//! - [`Address`]: ordered path-segment location of a node
//! - [`TypeKind`]: the fixed classification vocabulary
//! - [`ScalarValue`]: tagged scalar payload with strict typed extraction
//! - [`Node`]: the navigable node contract
//! - [`NodeVisitor`]: shape dispatch for generic tree algorithms
//! - [`Repository`]: a named handle yielding the tree root

pub mod address;
pub mod error;
pub mod node;
pub mod repository;
pub mod scalar;
pub mod types;

pub use address::Address;
pub use error::NodeError;
pub use node::{BinaryStream, Children, Node, NodeHandle, NodeVisitor};
pub use repository::Repository;
pub use scalar::{Decimal, ParseDecimalError, ScalarValue};
pub use types::TypeKind;
