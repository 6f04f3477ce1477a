//! Entry rendering for bare, one-per-line, long, and multi-column output.

mod escape;
mod long;

use std::ffi::OsStr;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::config::{Config, RenderMode, SizeUnits};
use crate::error::{LsError, Result};
use crate::humanize::humanize;
use crate::metadata::{group_label, user_label, MetadataSource, OwnerFormat};
use crate::tree::Entry;
use crate::width::WidthSet;

pub use escape::display_width;
pub use long::{format_timestamp, size_field};

/// Which text of an entry is printed: its base name (directory children)
/// or its path (operands).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Name,
    Path,
}

/// Mutable state for one batch: the widths (which caret/octal escaping may
/// grow) and one column counter per target.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub widths: WidthSet,
    name_column: usize,
    path_column: usize,
}

impl RenderState {
    pub fn new(widths: WidthSet) -> Self {
        Self {
            widths,
            ..Self::default()
        }
    }

    fn column_mut(&mut self, target: Target) -> &mut usize {
        match target {
            Target::Name => &mut self.name_column,
            Target::Path => &mut self.path_column,
        }
    }

    fn width_mut(&mut self, target: Target) -> &mut usize {
        match target {
            Target::Name => &mut self.widths.name,
            Target::Path => &mut self.widths.path,
        }
    }

    fn row_open(&self) -> bool {
        self.name_column > 0 || self.path_column > 0
    }
}

/// Formats entries into a writer. One renderer serves a whole run; each
/// batch starts with [`Renderer::begin_batch`].
pub struct Renderer<'a> {
    config: &'a Config,
    source: &'a dyn MetadataSource,
    now: i64,
    state: RenderState,
    headers: usize,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a Config, source: &'a dyn MetadataSource) -> Self {
        Self::with_clock(config, source, chrono::Local::now().timestamp())
    }

    /// Renderer with a fixed "now" for the recent/old date decision.
    pub fn with_clock(config: &'a Config, source: &'a dyn MetadataSource, now: i64) -> Self {
        Self {
            config,
            source,
            now,
            state: RenderState::default(),
            headers: 0,
        }
    }

    /// Reset per-batch state around freshly scanned widths.
    pub fn begin_batch(&mut self, widths: WidthSet) {
        self.state = RenderState::new(widths);
    }

    /// Current widths, including any growth from escaping.
    pub fn widths(&self) -> &WidthSet {
        &self.state.widths
    }

    /// Render one entry in the configured mode.
    pub fn render<W: Write>(&mut self, out: &mut W, entry: &Entry, target: Target) -> Result<()> {
        match self.config.display {
            RenderMode::Bare => self.render_bare(out, entry, target),
            RenderMode::OnePerLine => self.render_line(out, entry, target),
            RenderMode::Long(format) => self.render_long(out, entry, target, format),
            RenderMode::Columns => self.render_column(out, entry, target),
        }
    }

    /// `path:` line for a directory, preceded by a blank line unless it is
    /// the first header of the run.
    pub fn header<W: Write>(&mut self, out: &mut W, dir: &Entry) -> Result<()> {
        if self.headers > 0 {
            out.write_all(b"\n")?;
        }
        self.headers += 1;
        out.write_all(&self.config.escaping.apply(dir.path.as_os_str()))?;
        out.write_all(b":\n")?;
        Ok(())
    }

    /// `total N` summary of the batch's allocated blocks.
    pub fn total<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let blocks = self.state.widths.total_blocks;
        let shown = match self.config.size_units {
            SizeUnits::Human => humanize(blocks * 512).trim_start().to_string(),
            SizeUnits::Raw | SizeUnits::Kilobytes => self.config.scaled_blocks(blocks).to_string(),
        };
        writeln!(out, "total {shown}")?;
        Ok(())
    }

    /// Close an open multi-column row and reset the column counters.
    pub fn finish_batch<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.state.row_open() {
            out.write_all(b"\n")?;
        }
        self.state.name_column = 0;
        self.state.path_column = 0;
        Ok(())
    }

    fn render_bare<W: Write>(&mut self, out: &mut W, entry: &Entry, target: Target) -> Result<()> {
        let text = self.escaped(entry, target);
        out.write_all(&text)?;
        Ok(())
    }

    fn render_line<W: Write>(&mut self, out: &mut W, entry: &Entry, target: Target) -> Result<()> {
        self.write_leading_columns(out, entry)?;
        let label = self.label(entry, target)?;
        out.write_all(&label)?;
        out.write_all(b"\n")?;
        Ok(())
    }

    fn render_long<W: Write>(
        &mut self,
        out: &mut W,
        entry: &Entry,
        target: Target,
        format: OwnerFormat,
    ) -> Result<()> {
        let md = &entry.metadata;
        let widths = self.state.widths;
        let human = self.config.size_units == SizeUnits::Human;

        self.write_leading_columns(out, entry)?;
        write!(
            out,
            "{} {:>links$} {:<owner$} {:<group$} {} {} ",
            md.permission_string(),
            md.nlink,
            user_label(self.source, md.uid, format),
            group_label(self.source, md.gid, format),
            size_field(md, &widths, human),
            format_timestamp(md.time(self.config.time_field), self.now),
            links = widths.links,
            owner = widths.owner,
            group = widths.group,
        )?;

        let text = self.escaped(entry, target);
        out.write_all(&text)?;

        if md.is_symlink() {
            let link = self.link_path(entry);
            let destination = self.source.read_link(&link)?;
            out.write_all(b" -> ")?;
            out.write_all(&self.config.escaping.apply(destination.as_os_str()))?;
            if self.config.type_suffix {
                if let Some(c) = self.resolved_suffix(&link)? {
                    write!(out, "{c}")?;
                }
            }
        } else if let Some(c) = self.suffix(entry) {
            write!(out, "{c}")?;
        }
        out.write_all(b"\n")?;
        Ok(())
    }

    fn render_column<W: Write>(&mut self, out: &mut W, entry: &Entry, target: Target) -> Result<()> {
        let label = self.label(entry, target)?;
        let label_width = display_width(&label);
        let field = *self.state.width_mut(target);
        let columns = (self.config.terminal_width / (self.leading_width() + field + 2)).max(1);

        let column = self.state.column_mut(target);
        *column += 1;
        if *column > columns {
            *column = 1;
            out.write_all(b"\n")?;
        }

        self.write_leading_columns(out, entry)?;
        out.write_all(&label)?;
        write!(out, "{:pad$}", "", pad = field.saturating_sub(label_width) + 1)?;
        Ok(())
    }

    /// Optional inode and block-count columns, each followed by a space.
    fn write_leading_columns<W: Write>(&self, out: &mut W, entry: &Entry) -> Result<()> {
        let md = &entry.metadata;
        let widths = &self.state.widths;
        if self.config.show_inode {
            write!(out, "{:>w$} ", md.ino, w = widths.inode)?;
        }
        if self.config.show_blocks {
            if self.config.size_units == SizeUnits::Human {
                write!(out, "{} ", humanize(md.blocks * 512))?;
            } else {
                write!(out, "{:>w$} ", self.config.scaled_blocks(md.blocks), w = widths.blocks)?;
            }
        }
        Ok(())
    }

    fn leading_width(&self) -> usize {
        let widths = &self.state.widths;
        let mut width = 0;
        if self.config.show_inode {
            width += widths.inode + 1;
        }
        if self.config.show_blocks {
            width += widths.blocks + 1;
        }
        width
    }

    /// Escaped name or path. Only caret/octal expansion can outgrow the
    /// scanned width; when it does the batch width grows for later entries.
    fn escaped(&mut self, entry: &Entry, target: Target) -> Vec<u8> {
        let raw: &OsStr = match target {
            Target::Name => &entry.name,
            Target::Path => entry.path.as_os_str(),
        };
        let text = self.config.escaping.apply(raw).into_owned();
        self.grow(target, display_width(&text));
        text
    }

    /// Escaped text plus the type suffix, for modes without link targets.
    /// In columns mode a symlink shows its resolved target's suffix.
    fn label(&mut self, entry: &Entry, target: Target) -> Result<Vec<u8>> {
        let mut label = self.escaped(entry, target);
        let suffix = if self.config.type_suffix
            && entry.metadata.is_symlink()
            && self.config.display == RenderMode::Columns
        {
            self.resolved_suffix(&self.link_path(entry))?
        } else {
            self.suffix(entry)
        };
        if let Some(c) = suffix {
            label.extend_from_slice(c.to_string().as_bytes());
            self.grow(target, display_width(&label));
        }
        Ok(label)
    }

    fn grow(&mut self, target: Target, width: usize) {
        let max = self.state.width_mut(target);
        *max = (*max).max(width);
    }

    fn suffix(&self, entry: &Entry) -> Option<char> {
        if self.config.type_suffix {
            entry.metadata.type_suffix()
        } else {
            None
        }
    }

    /// Path used to read a symlink: relative paths are anchored at `PWD`
    /// when it is known.
    fn link_path(&self, entry: &Entry) -> PathBuf {
        match &self.config.pwd {
            Some(pwd) if entry.path.is_relative() => pwd.join(&entry.path),
            _ => entry.path.clone(),
        }
    }

    /// Suffix of the symlink's final target. A dangling link keeps `@`.
    fn resolved_suffix(&self, link: &std::path::Path) -> Result<Option<char>> {
        let resolved = match self.source.canonicalize(link) {
            Ok(resolved) => resolved,
            Err(LsError::Resolve { source, .. }) if source.kind() == ErrorKind::NotFound => {
                return Ok(Some('@'));
            }
            Err(e) => return Err(e),
        };
        Ok(self.source.symlink_metadata(&resolved)?.type_suffix())
    }
}
