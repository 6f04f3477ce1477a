use std::path::Path;

use tracing::trace;
use walkdir::{DirEntry, WalkDir};

use super::{DirBatch, Descend, Entry, WalkOptions};
use crate::error::{LsError, Result};
use crate::metadata::MetadataSource;

const IMPLICIT_DOTS: [&str; 2] = [".", ".."];

/// Stack-based pre-order walker over directories.
///
/// Each step pops one pending directory and reads only its immediate
/// children; deeper levels are read when the consumer asks to descend.
/// Nothing is read ahead of the consumer.
pub struct TreeWalker<'s> {
    source: &'s dyn MetadataSource,
    options: WalkOptions,
    pending: Vec<Entry>,
}

impl<'s> TreeWalker<'s> {
    /// Walk `roots` in the order given.
    pub fn new(roots: Vec<Entry>, options: WalkOptions, source: &'s dyn MetadataSource) -> Self {
        let mut pending = roots;
        pending.reverse();
        Self {
            source,
            options,
            pending,
        }
    }

    /// Read the next pending directory. `None` once the walk is complete.
    pub fn next_batch(&mut self) -> Option<Result<DirBatch>> {
        let dir = self.pending.pop()?;
        Some(self.read_children(&dir.path).map(|children| DirBatch { dir, children }))
    }

    /// Queue the batch's subdirectories ahead of everything already pending,
    /// so they are visited next, in child order.
    pub fn descend(&mut self, batch: &DirBatch, control: Descend) {
        if control == Descend::Skip || !self.options.recursive {
            return;
        }
        let subdirs = batch
            .children
            .iter()
            .rev()
            .filter(|c| c.is_dir() && !IMPLICIT_DOTS.iter().any(|d| c.name == *d));
        self.pending.extend(subdirs.cloned());
    }

    /// Drive the walk to completion. `visit` sees every directory batch and
    /// answers whether to descend into its subdirectories.
    pub fn walk<F>(mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&DirBatch) -> Result<Descend>,
    {
        while let Some(batch) = self.next_batch() {
            let batch = batch?;
            let control = visit(&batch)?;
            self.descend(&batch, control);
        }
        Ok(())
    }

    /// Immediate children of `dir`, filtered by visibility before any stat
    /// and ordered by the sorter.
    fn read_children(&self, dir: &Path) -> Result<Vec<Entry>> {
        let visibility = self.options.visibility;
        let iter = WalkDir::new(dir)
            .follow_links(false)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_entry(move |entry| visibility.admits(entry.file_name()));

        let mut children = Vec::new();
        for entry_result in iter {
            let entry = entry_result.map_err(|source| LsError::Walk {
                path: dir.to_path_buf(),
                source,
            })?;
            children.push(self.snapshot(entry)?);
        }

        if visibility.includes_implicit_dots() {
            for dot in IMPLICIT_DOTS {
                let path = dir.join(dot);
                let metadata = self.source.symlink_metadata(&path)?;
                children.push(Entry::new(path, dot.into(), metadata));
            }
        }

        if let Some(sorter) = self.options.sorter {
            sorter.sort(&mut children);
        }
        trace!(dir = %dir.display(), children = children.len(), "read directory");
        Ok(children)
    }

    /// Entry for a walked child, stat'ed through the metadata source.
    fn snapshot(&self, entry: DirEntry) -> Result<Entry> {
        let metadata = self.source.symlink_metadata(entry.path())?;
        Ok(Entry::new(
            entry.path().to_path_buf(),
            entry.file_name().to_os_string(),
            metadata,
        ))
    }
}
