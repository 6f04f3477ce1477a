//! Per-batch column widths, computed in one pass before rendering.

use crate::config::{Config, RenderMode, SizeUnits};
use crate::metadata::{group_label, user_label, MetadataSource, OwnerFormat};
use crate::tree::Entry;

/// Width of a human-readable size or block count.
pub const HUMAN_WIDTH: usize = 4;

/// Maximum display width of every column across one batch, plus the
/// batch's total block count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidthSet {
    pub inode: usize,
    pub blocks: usize,
    pub links: usize,
    pub owner: usize,
    pub group: usize,
    pub size: usize,
    pub major: usize,
    pub minor: usize,
    pub name: usize,
    pub path: usize,
    /// Sum of allocated 512-byte blocks.
    pub total_blocks: u64,
}

impl WidthSet {
    /// Scan a batch. An empty batch yields all zeros.
    pub fn scan<'a, I>(entries: I, config: &Config, source: &dyn MetadataSource) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut widths = Self::default();
        for entry in entries {
            widths.observe(entry, config, source);
        }
        widths
    }

    /// Fold one entry into the maxima.
    pub fn observe(&mut self, entry: &Entry, config: &Config, source: &dyn MetadataSource) {
        let md = &entry.metadata;
        let human = config.size_units == SizeUnits::Human;

        self.inode = self.inode.max(digits(md.ino));
        self.blocks = self.blocks.max(if human {
            HUMAN_WIDTH
        } else {
            digits(config.scaled_blocks(md.blocks))
        });
        self.links = self.links.max(digits(md.nlink));
        self.size = self.size.max(if human { HUMAN_WIDTH } else { digits(md.size) });

        if md.is_device() {
            self.major = self.major.max(digits(md.major()));
            self.minor = self.minor.max(digits(md.minor()));
        }

        // Name lookups are the expensive part of a scan; skip them unless
        // the owner columns are rendered.
        if let RenderMode::Long(format) = config.display {
            let (owner, group) = match format {
                OwnerFormat::Numeric => (digits(md.uid.into()), digits(md.gid.into())),
                OwnerFormat::Named => (
                    user_label(source, md.uid, format).chars().count(),
                    group_label(source, md.gid, format).chars().count(),
                ),
            };
            self.owner = self.owner.max(owner);
            self.group = self.group.max(group);
        }

        let suffix = usize::from(config.type_suffix && md.type_suffix().is_some());
        self.name = self
            .name
            .max(config.escaping.scan_width(&entry.name) + suffix);
        self.path = self
            .path
            .max(config.escaping.scan_width(entry.path.as_os_str()) + suffix);

        self.total_blocks += md.blocks;
    }

    /// Width of the size column: wide enough for a plain size or a
    /// `major, minor` pair.
    pub fn size_column(&self) -> usize {
        self.size.max(self.major + self.minor + 2)
    }
}

/// Decimal digit count.
pub fn digits(n: u64) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}
