//! Top-level listing run: classify operands, then render the file batch and
//! every directory batch in traversal order.

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, trace};

use crate::config::{Config, RenderMode};
use crate::error::Result;
use crate::metadata::MetadataSource;
use crate::render::{Renderer, Target};
use crate::tree::{Descend, Entry, Sorter, TreeWalker};
use crate::width::WidthSet;

/// List `operands` (or `.` when empty) into `out`.
///
/// Every failure is fatal; output written before the failure stays written.
pub fn run<W: Write>(
    out: &mut W,
    operands: &[PathBuf],
    config: &Config,
    source: &dyn MetadataSource,
) -> Result<()> {
    let operands = if operands.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        operands.to_vec()
    };

    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for path in operands {
        let metadata = source.symlink_metadata(&path)?;
        let entry = Entry::operand(path, metadata);
        trace!(path = %entry.path.display(), dir = entry.is_dir(), "operand");
        if entry.is_dir() && !config.directories_as_files {
            dirs.push(entry);
        } else {
            files.push(entry);
        }
    }

    let order = Sorter::operands(config.reverse);
    files.sort_unstable_by(|a, b| order.compare_names(a.path.as_os_str(), b.path.as_os_str()));
    dirs.sort_unstable_by(|a, b| order.compare_names(a.path.as_os_str(), b.path.as_os_str()));

    let mut renderer = Renderer::new(config, source);

    if !files.is_empty() {
        list_batch(out, &mut renderer, config, source, &files, Target::Path)?;
        if !dirs.is_empty() {
            out.write_all(b"\n")?;
        }
    }

    let show_headers = config.recursive || dirs.len() > 1 || !files.is_empty();
    let walker = TreeWalker::new(dirs, config.walk_options(), source);
    walker.walk(|batch| {
        debug!(
            dir = %batch.dir.path.display(),
            children = batch.children.len(),
            "listing directory"
        );
        if show_headers {
            renderer.header(out, &batch.dir)?;
        }
        // The walker skipped hidden names before stat'ing them; filter again
        // at emission with the same policy.
        let visible: Vec<&Entry> = batch
            .children
            .iter()
            .filter(|child| config.visibility.admits(&child.name))
            .collect();
        renderer.begin_batch(WidthSet::scan(visible.iter().copied(), config, source));
        trace!(widths = ?renderer.widths(), "scanned batch");
        if config.shows_total() {
            renderer.total(out)?;
        }
        for child in visible {
            emit(out, &mut renderer, config, child, Target::Name)?;
        }
        renderer.finish_batch(out)?;

        Ok(if config.recursive {
            Descend::Into
        } else {
            Descend::Skip
        })
    })
}

/// Scan then render a batch of operands.
fn list_batch<W: Write>(
    out: &mut W,
    renderer: &mut Renderer<'_>,
    config: &Config,
    source: &dyn MetadataSource,
    entries: &[Entry],
    target: Target,
) -> Result<()> {
    renderer.begin_batch(WidthSet::scan(entries, config, source));
    trace!(widths = ?renderer.widths(), "scanned operands");
    for entry in entries {
        emit(out, renderer, config, entry, target)?;
    }
    renderer.finish_batch(out)
}

fn emit<W: Write>(
    out: &mut W,
    renderer: &mut Renderer<'_>,
    config: &Config,
    entry: &Entry,
    target: Target,
) -> Result<()> {
    renderer.render(out, entry, target)?;
    if config.display == RenderMode::Bare {
        out.write_all(b"\n")?;
    }
    Ok(())
}
