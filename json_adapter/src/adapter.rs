//! Mounting a parsed document as a repository

use std::sync::Arc;

use repo_api::{Address, NodeHandle, Repository};

use crate::node::JsonNode;
use crate::value::DocValue;

/// A repository over one mounted, immutable document value.
///
/// The document is converted into the closed [`DocValue`] union once; nodes
/// handed out afterwards are cheap projections sharing it.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    document: Arc<DocValue>,
    mount: Address,
}

impl DocumentRepository {
    /// Mounts a parsed document at the root address
    pub fn mount(value: impl Into<DocValue>) -> Self {
        Self::mount_at(value, Address::root())
    }

    /// Mounts a parsed document at an arbitrary address.
    ///
    /// Node addresses are then rooted at `mount`; the root node's name is
    /// the mount's last segment.
    pub fn mount_at(value: impl Into<DocValue>, mount: Address) -> Self {
        DocumentRepository {
            document: Arc::new(value.into()),
            mount,
        }
    }
}

impl Repository for DocumentRepository {
    fn name(&self) -> &str {
        "document"
    }

    fn root(&self) -> NodeHandle {
        Box::new(JsonNode::new(
            self.document.clone(),
            self.mount.clone(),
            self.mount.clone(),
        ))
    }
}
