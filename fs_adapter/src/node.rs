//! Filesystem nodes
//!
//! A node is a projection over the mounted root plus an address; the
//! directory/file distinction is re-read from the filesystem on every call,
//! so a node never goes stale. Three kinds exist behind one type: plain
//! entries (directories and files), synthetic attribute fields of a file,
//! and the `fileContent` binary field.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use repo_api::{
    Address, BinaryStream, Children, Decimal, Node, NodeError, NodeHandle, NodeVisitor,
    ScalarValue, TypeKind,
};

use crate::attrs::FileAttr;
use crate::path::is_valid_name;

/// Field name of the binary content child every file node exposes
pub const FILE_CONTENT_FIELD: &str = "fileContent";

#[derive(Debug, Clone)]
enum FsNodeKind {
    /// A path inside the root: a directory or a regular file
    Entry,
    /// Synthetic metadata field of a file
    Attribute(FileAttr),
    /// The `fileContent` field of a file
    Content,
}

/// A node of the filesystem tree
#[derive(Debug, Clone)]
pub struct FsNode {
    root: Arc<PathBuf>,
    address: Address,
    kind: FsNodeKind,
}

impl FsNode {
    pub(crate) fn entry(root: Arc<PathBuf>, address: Address) -> Self {
        FsNode {
            root,
            address,
            kind: FsNodeKind::Entry,
        }
    }

    fn attribute(&self, attr: FileAttr) -> Self {
        FsNode {
            root: self.root.clone(),
            address: self.address.resolve(attr.name()),
            kind: FsNodeKind::Attribute(attr),
        }
    }

    fn content(&self) -> Self {
        FsNode {
            root: self.root.clone(),
            address: self.address.resolve(FILE_CONTENT_FIELD),
            kind: FsNodeKind::Content,
        }
    }

    /// The real path backing this node.
    ///
    /// For synthetic fields the last address segment is the field name, not
    /// a filesystem entry, so it is not part of the path.
    fn backing_path(&self) -> PathBuf {
        let segments = match self.kind {
            FsNodeKind::Entry => self.address.segments(),
            FsNodeKind::Attribute(_) | FsNodeKind::Content => {
                let segments = self.address.segments();
                &segments[..segments.len().saturating_sub(1)]
            }
        };
        let mut path = (*self.root).clone();
        for segment in segments {
            path.push(segment);
        }
        path
    }

    /// Resolves the typed-accessor payload, or the error the accessor owes.
    ///
    /// Attribute fields answer only the accessor matching their natural
    /// type; anything else is structurally inapplicable for this adapter.
    /// Plain entries are composite (or vanished) and mismatch everything.
    fn typed_scalar(
        &self,
        requested: TypeKind,
        operation: &'static str,
    ) -> Result<ScalarValue, NodeError> {
        match &self.kind {
            FsNodeKind::Attribute(attr) => {
                if attr.kind() == requested {
                    attr.read(&self.backing_path(), &self.address)
                } else {
                    Err(NodeError::Unsupported {
                        address: self.address.clone(),
                        operation,
                    })
                }
            }
            FsNodeKind::Content => Err(NodeError::Unsupported {
                address: self.address.clone(),
                operation,
            }),
            FsNodeKind::Entry => Err(NodeError::TypeMismatch {
                address: self.address.clone(),
                requested,
                actual: self.type_of(),
            }),
        }
    }

    fn entry_child(&self, name: &str) -> Result<Option<NodeHandle>, NodeError> {
        if !is_valid_name(name) {
            return Err(NodeError::OutsideRoot {
                path: name.to_string(),
            });
        }

        let path = self.backing_path().join(name);
        match fs::symlink_metadata(&path) {
            Ok(_) => Ok(Some(Box::new(FsNode::entry(
                self.root.clone(),
                self.address.resolve(name),
            )))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NodeError::backend(&self.address, "look up entry", e)),
        }
    }

    fn file_child(&self, name: &str) -> Result<Option<NodeHandle>, NodeError> {
        if name == FILE_CONTENT_FIELD {
            return Ok(Some(Box::new(self.content())));
        }
        match FileAttr::from_name(name) {
            Some(attr) => Ok(Some(Box::new(self.attribute(attr)))),
            None => Err(NodeError::UnknownAttribute {
                address: self.address.clone(),
                name: name.to_string(),
            }),
        }
    }
}

impl Node for FsNode {
    fn address(&self) -> &Address {
        &self.address
    }

    fn type_of(&self) -> TypeKind {
        match &self.kind {
            FsNodeKind::Entry => match fs::metadata(self.backing_path()) {
                Ok(meta) if meta.is_dir() => TypeKind::Array,
                Ok(meta) if meta.is_file() => TypeKind::Object,
                _ => TypeKind::Undefined,
            },
            FsNodeKind::Attribute(attr) => attr.kind(),
            FsNodeKind::Content => TypeKind::Binary,
        }
    }

    /// Directories and files are both name-keyed: a directory's children are
    /// its entries, a file's children its synthetic fields.
    fn is_object(&self) -> bool {
        matches!(self.kind, FsNodeKind::Entry) && self.type_of().is_composite()
    }

    fn is_array(&self) -> bool {
        false
    }

    fn child(&self, name: &str) -> Result<Option<NodeHandle>, NodeError> {
        match &self.kind {
            FsNodeKind::Entry => match self.type_of() {
                TypeKind::Array => self.entry_child(name),
                TypeKind::Object => self.file_child(name),
                _ => Ok(None),
            },
            FsNodeKind::Attribute(_) | FsNodeKind::Content => Ok(None),
        }
    }

    fn children(&self) -> Children {
        match &self.kind {
            FsNodeKind::Entry => match self.type_of() {
                TypeKind::Array => Box::new(DirChildren {
                    root: self.root.clone(),
                    address: self.address.clone(),
                    path: self.backing_path(),
                    reader: None,
                    exhausted: false,
                }),
                TypeKind::Object => {
                    let content: NodeHandle = Box::new(self.content());
                    Box::new(std::iter::once(Ok(content)))
                }
                _ => Box::new(std::iter::empty()),
            },
            FsNodeKind::Attribute(_) | FsNodeKind::Content => Box::new(std::iter::empty()),
        }
    }

    fn as_string(&self) -> Result<Option<String>, NodeError> {
        match &self.kind {
            FsNodeKind::Entry => Ok(None),
            FsNodeKind::Attribute(attr) => {
                let value = attr.read(&self.backing_path(), &self.address)?;
                Ok(value.display())
            }
            FsNodeKind::Content => {
                let bytes = fs::read(self.backing_path())
                    .map_err(|e| NodeError::backend(&self.address, "read content", e))?;
                Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
            }
        }
    }

    fn as_boolean(&self) -> Result<bool, NodeError> {
        self.typed_scalar(TypeKind::Boolean, "as_boolean")?
            .try_boolean(&self.address)
    }

    fn as_long(&self) -> Result<i64, NodeError> {
        self.typed_scalar(TypeKind::Long, "as_long")?
            .try_long(&self.address)
    }

    fn as_double(&self) -> Result<f64, NodeError> {
        self.typed_scalar(TypeKind::Double, "as_double")?
            .try_double(&self.address)
    }

    fn as_decimal(&self) -> Result<Decimal, NodeError> {
        self.typed_scalar(TypeKind::Decimal, "as_decimal")?
            .try_decimal(&self.address)
    }

    fn as_date(&self) -> Result<NaiveDate, NodeError> {
        self.typed_scalar(TypeKind::Date, "as_date")?
            .try_date(&self.address)
    }

    fn as_datetime(&self) -> Result<DateTime<Utc>, NodeError> {
        self.typed_scalar(TypeKind::DateTime, "as_datetime")?
            .try_datetime(&self.address)
    }

    fn as_binary(&self) -> Result<BinaryStream, NodeError> {
        match &self.kind {
            FsNodeKind::Content => {
                let file = fs::File::open(self.backing_path())
                    .map_err(|e| NodeError::backend(&self.address, "open content", e))?;
                Ok(Box::new(file))
            }
            FsNodeKind::Attribute(_) => Err(NodeError::Unsupported {
                address: self.address.clone(),
                operation: "as_binary",
            }),
            FsNodeKind::Entry => Err(NodeError::TypeMismatch {
                address: self.address.clone(),
                requested: TypeKind::Binary,
                actual: self.type_of(),
            }),
        }
    }

    fn accept(&self, visitor: &mut dyn NodeVisitor) -> Result<(), NodeError> {
        match &self.kind {
            FsNodeKind::Entry if self.type_of().is_composite() => visitor.visit_object(self),
            _ => visitor.visit_scalar(self),
        }
    }
}

/// Lazy directory enumeration.
///
/// The OS directory stream is opened on the first pull and at most one
/// pending entry is held; a fresh iterator (a new `children()` call) reads
/// fresh state.
struct DirChildren {
    root: Arc<PathBuf>,
    address: Address,
    path: PathBuf,
    reader: Option<fs::ReadDir>,
    exhausted: bool,
}

impl Iterator for DirChildren {
    type Item = Result<NodeHandle, NodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        if self.reader.is_none() {
            match fs::read_dir(&self.path) {
                Ok(reader) => self.reader = Some(reader),
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(NodeError::backend(&self.address, "list directory", e)));
                }
            }
        }

        let reader = self.reader.as_mut()?;
        match reader.next()? {
            Ok(entry) => {
                let name = entry.file_name().to_string_lossy().into_owned();
                Some(Ok(Box::new(FsNode::entry(
                    self.root.clone(),
                    self.address.resolve(name),
                ))))
            }
            Err(e) => Some(Err(NodeError::backend(&self.address, "list directory", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use super::*;

    fn scratch_root() -> (tempfile::TempDir, Arc<PathBuf>) {
        let dir = tempfile::tempdir().unwrap();
        let root = Arc::new(dir.path().to_path_buf());
        (dir, root)
    }

    fn write_file(root: &PathBuf, name: &str, content: &[u8]) {
        let mut file = fs::File::create(root.join(name)).unwrap();
        file.write_all(content).unwrap();
    }

    #[test]
    fn test_directory_is_array_classified_but_object_shaped() {
        let (_dir, root) = scratch_root();
        let node = FsNode::entry(root, Address::root());

        assert_eq!(node.type_of(), TypeKind::Array);
        assert!(node.is_object());
        assert!(!node.is_array());
        assert!(!node.is_scalar());
    }

    #[test]
    fn test_file_is_object_classified() {
        let (_dir, root) = scratch_root();
        write_file(&root, "note.txt", b"someText");

        let node = FsNode::entry(root, Address::root().resolve("note.txt"));
        assert_eq!(node.type_of(), TypeKind::Object);
        assert!(node.is_object());
    }

    #[test]
    fn test_missing_child_is_absent_not_an_error() {
        let (_dir, root) = scratch_root();
        let node = FsNode::entry(root, Address::root());
        assert!(node.child("doesNotExist").unwrap().is_none());
    }

    #[test]
    fn test_escaping_child_name_is_rejected() {
        let (_dir, root) = scratch_root();
        let node = FsNode::entry(root, Address::root());
        assert!(matches!(
            node.child(".."),
            Err(NodeError::OutsideRoot { .. })
        ));
    }

    #[test]
    fn test_unknown_attribute_is_an_error() {
        let (_dir, root) = scratch_root();
        write_file(&root, "note.txt", b"someText");

        let node = FsNode::entry(root, Address::root().resolve("note.txt"));
        assert!(matches!(
            node.child("inode"),
            Err(NodeError::UnknownAttribute { .. })
        ));
    }

    #[test]
    fn test_file_children_enumerate_content_field_only() {
        let (_dir, root) = scratch_root();
        write_file(&root, "note.txt", b"someText");

        let node = FsNode::entry(root, Address::root().resolve("note.txt"));
        let names: Vec<String> = node
            .children()
            .map(|child| child.unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec![FILE_CONTENT_FIELD]);
    }

    #[test]
    fn test_attribute_values_and_strictness() {
        let (_dir, root) = scratch_root();
        write_file(&root, "note.txt", b"someText");

        let file = FsNode::entry(root, Address::root().resolve("note.txt"));
        let size = file.child("size").unwrap().unwrap();
        assert_eq!(size.type_of(), TypeKind::Long);
        assert_eq!(size.as_long().unwrap(), 8);
        assert_eq!(size.as_string().unwrap().unwrap(), "8");
        assert!(matches!(
            size.as_datetime(),
            Err(NodeError::Unsupported { .. })
        ));
        assert!(matches!(size.as_binary(), Err(NodeError::Unsupported { .. })));
        assert!(size.child("anything").unwrap().is_none());
        assert_eq!(size.children().count(), 0);
    }

    #[test]
    fn test_content_streams_exact_bytes() {
        let (_dir, root) = scratch_root();
        write_file(&root, "note.txt", b"someText");

        let file = FsNode::entry(root, Address::root().resolve("note.txt"));
        let content = file.child(FILE_CONTENT_FIELD).unwrap().unwrap();
        assert_eq!(content.type_of(), TypeKind::Binary);

        let mut bytes = Vec::new();
        content.as_binary().unwrap().read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, b"someText");

        assert_eq!(content.as_string().unwrap().unwrap(), "someText");
        assert!(matches!(
            content.as_long(),
            Err(NodeError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_directory_children_restartable() {
        let (_dir, root) = scratch_root();
        write_file(&root, "a.txt", b"a");
        write_file(&root, "b.txt", b"b");

        let node = FsNode::entry(root, Address::root());
        let pass = |node: &FsNode| -> Vec<String> {
            let mut names: Vec<String> = node
                .children()
                .map(|child| child.unwrap().name().to_string())
                .collect();
            names.sort();
            names
        };

        let first = pass(&node);
        let second = pass(&node);
        assert_eq!(first, vec!["a.txt", "b.txt"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_vanished_entry_classifies_undefined() {
        let (_dir, root) = scratch_root();
        let node = FsNode::entry(root, Address::root().resolve("gone.txt"));

        assert_eq!(node.type_of(), TypeKind::Undefined);
        assert!(node.is_scalar());
        assert!(node.as_string().unwrap().is_none());
        assert!(node.child("anything").unwrap().is_none());
        assert_eq!(node.children().count(), 0);
        assert!(matches!(
            node.as_long(),
            Err(NodeError::TypeMismatch { .. })
        ));
    }
}
