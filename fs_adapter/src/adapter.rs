//! Mounting a directory as a repository

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use repo_api::{Address, NodeError, NodeHandle, Repository};

use crate::node::FsNode;
use crate::path::split_path;

/// A repository rooted at a mounted directory.
///
/// All addressing is relative to the mounted root; nothing this repository
/// hands out can resolve outside it.
#[derive(Debug, Clone)]
pub struct FilesystemRepository {
    root: Arc<PathBuf>,
}

impl FilesystemRepository {
    /// Mounts an existing directory as the tree root.
    ///
    /// The path is canonicalized so later traversal is anchored to a fixed
    /// location regardless of the process working directory.
    pub fn mount(root: impl AsRef<Path>) -> Result<Self, NodeError> {
        let at = Address::root();
        let canonical = fs::canonicalize(root.as_ref())
            .map_err(|e| NodeError::backend(&at, "mount", e))?;

        let meta =
            fs::metadata(&canonical).map_err(|e| NodeError::backend(&at, "mount", e))?;
        if !meta.is_dir() {
            return Err(NodeError::backend(
                &at,
                "mount",
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("mount root is not a directory: {}", canonical.display()),
                ),
            ));
        }

        Ok(Self {
            root: Arc::new(canonical),
        })
    }

    /// Resolves a slash-separated path against the tree root.
    ///
    /// The empty path (or `/`) is the root itself. A path naming a missing
    /// entry yields `Ok(None)`; a path that cannot stay inside the root is
    /// an error.
    pub fn node_at(&self, path: &str) -> Result<Option<NodeHandle>, NodeError> {
        let segments = split_path(path)?;

        let mut node: NodeHandle = self.root();
        for segment in segments {
            match node.child(segment)? {
                Some(next) => node = next,
                None => return Ok(None),
            }
        }
        Ok(Some(node))
    }
}

impl Repository for FilesystemRepository {
    fn name(&self) -> &str {
        "filesystem"
    }

    fn root(&self) -> NodeHandle {
        Box::new(FsNode::entry(self.root.clone(), Address::root()))
    }
}
