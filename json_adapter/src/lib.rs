//! # Structured-Document Adapter
//!
//! This crate projects an already-parsed document tree onto the uniform node
//! contract. Parsing is someone else's job: the external parser hands this
//! layer an in-memory value, which is converted once into the closed
//! [`DocValue`] union so classification stays exhaustive and
//! compiler-checked.
//!
//! ## Design
//!
//! - Object values become field-keyed composite nodes, enumerating in the
//!   document's declared field order.
//! - Array values become position-keyed composite nodes; an element's
//!   address appends its 0-based index as a segment.
//! - Everything else is a scalar, classified by the most specific kind the
//!   value supports; null is `Undefined`.
//! - Nodes are cheap `{document, address}` projections re-located on every
//!   call; nothing is cached and enumeration buffers only the next index.

pub mod adapter;
pub mod node;
pub mod value;

pub use adapter::DocumentRepository;
pub use node::{JsonNode, REFERENCE_FIELD};
pub use value::DocValue;
