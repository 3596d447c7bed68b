//! File attribute fields
//!
//! A file node exposes its metadata as synthetic scalar children, resolved
//! on demand from the filesystem's attribute queries. The set is closed:
//! asking for anything else is an error, never a silent null.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use repo_api::{Address, NodeError, ScalarValue, TypeKind};

/// A pass-through file attribute, classified by its natural type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAttr {
    /// File length in bytes (`Long`)
    Size,
    /// Birth timestamp (`DateTime`)
    CreationTime,
    /// Last modification timestamp (`DateTime`)
    LastModifiedTime,
    /// Regular-file flag (`Boolean`)
    IsRegularFile,
    /// Directory flag (`Boolean`)
    IsDirectory,
    /// Symbolic-link flag (`Boolean`)
    IsSymbolicLink,
}

impl FileAttr {
    /// All supported attributes
    pub const ALL: [FileAttr; 6] = [
        FileAttr::Size,
        FileAttr::CreationTime,
        FileAttr::LastModifiedTime,
        FileAttr::IsRegularFile,
        FileAttr::IsDirectory,
        FileAttr::IsSymbolicLink,
    ];

    /// Looks an attribute up by its field name
    pub fn from_name(name: &str) -> Option<FileAttr> {
        FileAttr::ALL.iter().copied().find(|attr| attr.name() == name)
    }

    /// The field name this attribute is addressed by
    pub fn name(self) -> &'static str {
        match self {
            FileAttr::Size => "size",
            FileAttr::CreationTime => "creationTime",
            FileAttr::LastModifiedTime => "lastModifiedTime",
            FileAttr::IsRegularFile => "isRegularFile",
            FileAttr::IsDirectory => "isDirectory",
            FileAttr::IsSymbolicLink => "isSymbolicLink",
        }
    }

    /// The classification of this attribute's value
    pub fn kind(self) -> TypeKind {
        match self {
            FileAttr::Size => TypeKind::Long,
            FileAttr::CreationTime | FileAttr::LastModifiedTime => TypeKind::DateTime,
            FileAttr::IsRegularFile | FileAttr::IsDirectory | FileAttr::IsSymbolicLink => {
                TypeKind::Boolean
            }
        }
    }

    /// Queries the attribute from the filesystem.
    ///
    /// `IsSymbolicLink` inspects the entry itself; everything else follows
    /// links, matching how the entry was classified in the first place.
    pub fn read(self, path: &Path, at: &Address) -> Result<ScalarValue, NodeError> {
        let query = |e| NodeError::backend(at, "query attribute", e);

        match self {
            FileAttr::IsSymbolicLink => {
                let meta = fs::symlink_metadata(path).map_err(query)?;
                Ok(ScalarValue::Boolean(meta.file_type().is_symlink()))
            }
            FileAttr::Size => {
                let meta = fs::metadata(path).map_err(query)?;
                Ok(ScalarValue::Long(meta.len() as i64))
            }
            FileAttr::CreationTime => {
                let created = fs::metadata(path).map_err(query)?.created().map_err(query)?;
                Ok(ScalarValue::DateTime(DateTime::<Utc>::from(created)))
            }
            FileAttr::LastModifiedTime => {
                let modified = fs::metadata(path).map_err(query)?.modified().map_err(query)?;
                Ok(ScalarValue::DateTime(DateTime::<Utc>::from(modified)))
            }
            FileAttr::IsRegularFile => {
                let meta = fs::metadata(path).map_err(query)?;
                Ok(ScalarValue::Boolean(meta.is_file()))
            }
            FileAttr::IsDirectory => {
                let meta = fs::metadata(path).map_err(query)?;
                Ok(ScalarValue::Boolean(meta.is_dir()))
            }
        }
    }
}
