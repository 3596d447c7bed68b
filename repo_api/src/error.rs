//! Error taxonomy for node operations
//!
//! Absence is not an error: a missing child is `Ok(None)` from
//! [`Node::child`](crate::Node::child). Everything here is a genuine
//! failure, reported synchronously at the triggering call with the address
//! and the attempted operation, and never retried or logged internally.

use thiserror::Error;

use crate::{Address, TypeKind};

/// Errors that can occur while navigating or extracting from a node
#[derive(Debug, Error)]
pub enum NodeError {
    /// A typed accessor was invoked against a non-matching classification
    #[error("type mismatch at {address}: requested {requested}, node is {actual}")]
    TypeMismatch {
        address: Address,
        requested: TypeKind,
        actual: TypeKind,
    },

    /// The accessor is structurally inapplicable for this adapter
    #[error("unsupported operation at {address}: {operation}")]
    Unsupported {
        address: Address,
        operation: &'static str,
    },

    /// A file attribute outside the supported set was requested
    #[error("unknown attribute `{name}` at {address}")]
    UnknownAttribute { address: Address, name: String },

    /// A supplied path resolves outside the configured root
    #[error("path `{path}` escapes the repository root")]
    OutsideRoot { path: String },

    /// The underlying backend access failed
    #[error("backend failure at {address} during {operation}: {source}")]
    Backend {
        address: Address,
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl NodeError {
    /// Wraps an I/O fault with the address and operation that triggered it
    pub fn backend(address: &Address, operation: &'static str, source: std::io::Error) -> Self {
        NodeError::Backend {
            address: address.clone(),
            operation,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_address_context() {
        let at = Address::root().resolve("a").resolve("b");

        let err = NodeError::TypeMismatch {
            address: at.clone(),
            requested: TypeKind::Long,
            actual: TypeKind::String,
        };
        assert_eq!(
            err.to_string(),
            "type mismatch at /a/b: requested Long, node is String"
        );

        let err = NodeError::UnknownAttribute {
            address: at.clone(),
            name: "inode".to_string(),
        };
        assert_eq!(err.to_string(), "unknown attribute `inode` at /a/b");

        let err = NodeError::backend(
            &at,
            "read",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("backend failure at /a/b during read"));
    }
}
