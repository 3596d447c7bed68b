//! Node addresses
//!
//! An address is an ordered sequence of path segments locating a node from
//! the root of its tree. The model is shared by every backend and carries no
//! backend semantics; what a segment *means* (directory entry, field name,
//! array position) is the adapter's business.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hierarchical location of a node, relative to its tree root.
///
/// The root address is the empty sequence and its name is the empty string.
/// Equality and hashing are structural: two addresses are equal iff their
/// segment sequences are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address {
    segments: Vec<String>,
}

impl Address {
    /// The root address (empty segment sequence)
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Builds an address from its segment sequence
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// True for the root address
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the root address (alias so `len`/`is_empty` pair up)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segment sequence
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, or the empty string at root
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Returns a new address with `segment` appended
    pub fn resolve(&self, segment: impl Into<String>) -> Address {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Address { segments }
    }

    /// Returns the enclosing address, or `None` at root
    pub fn parent(&self) -> Option<Address> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Address {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// True if `prefix` is a leading subsequence of this address
    pub fn starts_with(&self, prefix: &Address) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// The segments of this address below `base`, or `None` if this address
    /// is not under `base`
    pub fn relative_to<'a>(&'a self, base: &Address) -> Option<&'a [String]> {
        if !self.starts_with(base) {
            return None;
        }
        Some(&self.segments[base.segments.len()..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}
