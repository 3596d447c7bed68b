//! # Filesystem Adapter
//!
//! This crate projects a mounted directory subtree onto the uniform node
//! contract.
//!
//! ## Design
//!
//! - A directory becomes a composite node of the "directory" category: its
//!   children are its entries, looked up by name and enumerated lazily.
//! - A regular file becomes an object node whose children are synthetic
//!   metadata fields — `fileContent` (a binary scalar streaming the file's
//!   bytes) plus on-demand attribute lookups (`size`, `creationTime`, …) —
//!   never the byte content directly.
//! - Every path is normalized against the mounted root; nothing resolves
//!   outside it.
//! - All I/O happens at the call that needs it: listing a directory, querying
//!   an attribute, opening a content stream. Nothing is cached or retried.

pub mod adapter;
pub mod attrs;
pub mod node;
mod path;

pub use adapter::FilesystemRepository;
pub use attrs::FileAttr;
pub use node::{FsNode, FILE_CONTENT_FIELD};
