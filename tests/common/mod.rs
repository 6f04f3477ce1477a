#![allow(dead_code)]

use lsr::config::{Config, RenderMode};
use lsr::error::Result;
use lsr::metadata::{EntryMetadata, MetadataSource, SystemMetadata};
use lsr::tree::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Real filesystem lookups with a fixed passwd/group table, so owner
/// columns do not depend on the host.
pub struct FakeIdentities {
    fs: SystemMetadata,
    users: HashMap<u32, String>,
    groups: HashMap<u32, String>,
}

impl FakeIdentities {
    pub fn new() -> Self {
        Self {
            fs: SystemMetadata::new(),
            users: HashMap::new(),
            groups: HashMap::new(),
        }
    }

    pub fn user(mut self, uid: u32, name: &str) -> Self {
        self.users.insert(uid, name.to_string());
        self
    }

    pub fn group(mut self, gid: u32, name: &str) -> Self {
        self.groups.insert(gid, name.to_string());
        self
    }
}

impl MetadataSource for FakeIdentities {
    fn symlink_metadata(&self, path: &Path) -> Result<EntryMetadata> {
        self.fs.symlink_metadata(path)
    }

    fn read_link(&self, path: &Path) -> Result<PathBuf> {
        self.fs.read_link(path)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        self.fs.canonicalize(path)
    }

    fn user_name(&self, uid: u32) -> Option<String> {
        self.users.get(&uid).cloned()
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        self.groups.get(&gid).cloned()
    }
}

/// Piped-output config in the given display mode.
pub fn config(display: RenderMode) -> Config {
    Config {
        display,
        ..Config::default()
    }
}

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for p in paths {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
    tmp
}

/// Synthetic regular-file entry.
pub fn file_entry(name: &str, size: u64) -> Entry {
    Entry::new(
        PathBuf::from(name),
        name.into(),
        EntryMetadata {
            mode: 0o100_644,
            nlink: 1,
            size,
            ..Default::default()
        },
    )
}

/// Synthetic entry with an explicit mode.
pub fn entry_with_mode(name: &str, mode: u32) -> Entry {
    Entry::new(
        PathBuf::from(name),
        name.into(),
        EntryMetadata {
            mode,
            nlink: 1,
            ..Default::default()
        },
    )
}

/// Run a listing over `operands` and return stdout as text.
pub fn list(operands: &[PathBuf], config: &Config, source: &dyn MetadataSource) -> String {
    let mut out = Vec::new();
    lsr::listing::run(&mut out, operands, config, source).unwrap();
    String::from_utf8(out).unwrap()
}
