//! Repository handles
//!
//! A repository names a mounted tree and hands out its root node. Consumers
//! that hold one can walk any backend; everything past the root goes through
//! the [`Node`] contract.

use crate::NodeHandle;

/// A named, mounted tree
pub trait Repository {
    /// Human-readable name of this repository
    fn name(&self) -> &str;

    /// The root node; its address is empty and its name is the empty string
    fn root(&self) -> NodeHandle;
}
