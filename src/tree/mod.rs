//! Directory traversal, entry snapshots, and child ordering.

mod sort;
pub(crate) mod walk;

use std::ffi::OsString;
use std::path::PathBuf;

use crate::metadata::EntryMetadata;

pub use sort::{SortKey, Sorter};
pub use walk::TreeWalker;

/// Traversal classification of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryInfo {
    /// Anything that is not a directory.
    Regular,
    /// A directory, seen before its children.
    PreOrderDirectory,
}

/// One filesystem object visited during traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Path as supplied or joined during traversal (not canonical).
    pub path: PathBuf,
    /// Base name; for operands, the operand as given.
    pub name: OsString,
    pub info: EntryInfo,
    pub metadata: EntryMetadata,
}

impl Entry {
    pub fn new(path: PathBuf, name: OsString, metadata: EntryMetadata) -> Self {
        let info = if metadata.is_dir() {
            EntryInfo::PreOrderDirectory
        } else {
            EntryInfo::Regular
        };
        Self {
            path,
            name,
            info,
            metadata,
        }
    }

    /// Entry for a command-line operand: its name is the whole path.
    pub fn operand(path: PathBuf, metadata: EntryMetadata) -> Self {
        let name = path.as_os_str().to_os_string();
        Self::new(path, name, metadata)
    }

    pub fn is_dir(&self) -> bool {
        self.info == EntryInfo::PreOrderDirectory
    }
}

/// Configuration for tree walking.
#[derive(Debug, Clone, Copy)]
pub struct WalkOptions {
    /// Whether to descend below the operand directories.
    pub recursive: bool,
    pub visibility: crate::config::Visibility,
    /// `None` yields children in OS order.
    pub sorter: Option<Sorter>,
}

/// One directory and its immediate, filtered, ordered children.
#[derive(Debug, Clone)]
pub struct DirBatch {
    pub dir: Entry,
    pub children: Vec<Entry>,
}

/// The consumer's answer after seeing a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descend {
    Into,
    Skip,
}
