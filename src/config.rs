//! Resolved, read-only listing configuration.

use std::ffi::OsStr;
use std::path::PathBuf;

use crate::cli::Args;
use crate::metadata::{OwnerFormat, TimeField};
use crate::tree::{SortKey, Sorter, WalkOptions};

const DEFAULT_BLOCK_SIZE: u64 = 512;

/// Output layout for a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Escaped name only; the caller writes separators.
    Bare,
    #[default]
    OnePerLine,
    Long(OwnerFormat),
    Columns,
}

/// Which dot-named entries a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Hide every name starting with `.`.
    #[default]
    Visible,
    /// Show dot files, but not the implicit `.` and `..`.
    AlmostAll,
    /// Show everything, including the implicit `.` and `..`.
    All,
}

impl Visibility {
    /// Whether a child named `name` is listed. Operands are never filtered.
    pub fn admits(self, name: &OsStr) -> bool {
        match self {
            Self::Visible => !name.as_encoded_bytes().starts_with(b"."),
            Self::AlmostAll => name != "." && name != "..",
            Self::All => true,
        }
    }

    pub fn includes_implicit_dots(self) -> bool {
        self == Self::All
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeUnits {
    #[default]
    Raw,
    Human,
    Kilobytes,
}

/// How control and non-ASCII bytes in names are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escaping {
    /// Raw bytes.
    #[default]
    Literal,
    /// Every non-printable character becomes `?`.
    Substitute,
    /// `^X` for control bytes, `\ooo` for bytes >= 127.
    CaretOctal,
}

/// Facts about the process and terminal that shape the defaults.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub interactive: bool,
    pub superuser: bool,
    pub terminal_width: usize,
    /// Raw value of `BLOCKSIZE`.
    pub block_size: Option<String>,
    /// Raw value of `PWD`.
    pub pwd: Option<PathBuf>,
}

impl Environment {
    /// Capture the live process environment.
    pub fn from_process(interactive: bool, terminal_width: usize) -> Self {
        Self {
            interactive,
            superuser: uzers::get_effective_uid() == 0,
            terminal_width,
            block_size: std::env::var("BLOCKSIZE").ok(),
            pwd: std::env::var_os("PWD")
                .map(PathBuf::from)
                .filter(|pwd| names_current_dir(pwd)),
        }
    }
}

/// A stale `PWD` (inherited across a `chdir`) must not anchor link paths.
fn names_current_dir(pwd: &std::path::Path) -> bool {
    match (std::fs::canonicalize(pwd), std::env::current_dir()) {
        (Ok(pwd), Ok(cwd)) => std::fs::canonicalize(cwd).is_ok_and(|cwd| cwd == pwd),
        _ => false,
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub display: RenderMode,
    pub recursive: bool,
    /// `-d`: directory operands are listed as plain entries.
    pub directories_as_files: bool,
    pub visibility: Visibility,
    /// `None` keeps the order the OS returns.
    pub sort: Option<SortKey>,
    pub reverse: bool,
    pub time_field: TimeField,
    pub size_units: SizeUnits,
    pub show_blocks: bool,
    pub show_inode: bool,
    pub type_suffix: bool,
    pub escaping: Escaping,
    pub terminal_width: usize,
    /// Divisor for block counts when `size_units` is not human.
    pub block_size: u64,
    pub interactive: bool,
    pub pwd: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: RenderMode::OnePerLine,
            recursive: false,
            directories_as_files: false,
            visibility: Visibility::Visible,
            sort: Some(SortKey::Name),
            reverse: false,
            time_field: TimeField::Modified,
            size_units: SizeUnits::Raw,
            show_blocks: false,
            show_inode: false,
            type_suffix: false,
            escaping: Escaping::Literal,
            terminal_width: 80,
            block_size: DEFAULT_BLOCK_SIZE,
            interactive: false,
            pwd: None,
        }
    }
}

impl Config {
    /// Combine parsed arguments with the host environment.
    pub fn resolve(args: &Args, env: &Environment) -> Self {
        let display = if args.long {
            RenderMode::Long(OwnerFormat::Named)
        } else if args.numeric {
            RenderMode::Long(OwnerFormat::Numeric)
        } else if args.columns || args.across {
            RenderMode::Columns
        } else {
            RenderMode::OnePerLine
        };

        let escaping = if args.substitute {
            Escaping::Substitute
        } else if args.escape {
            Escaping::CaretOctal
        } else if env.interactive {
            Escaping::Substitute
        } else {
            Escaping::Literal
        };

        let visibility = if args.directory {
            Visibility::Visible
        } else if args.all {
            Visibility::All
        } else if args.almost_all || env.superuser {
            Visibility::AlmostAll
        } else {
            Visibility::Visible
        };

        let time_field = if args.ctime {
            TimeField::Changed
        } else if args.atime {
            TimeField::Accessed
        } else {
            TimeField::Modified
        };

        let sort = if args.unsorted {
            None
        } else if args.size_sort {
            Some(SortKey::Size)
        } else if args.time_sort {
            Some(SortKey::Time(time_field))
        } else {
            Some(SortKey::Name)
        };

        let size_units = if args.human {
            SizeUnits::Human
        } else if args.kilobytes {
            SizeUnits::Kilobytes
        } else {
            SizeUnits::Raw
        };

        let block_size = match size_units {
            SizeUnits::Kilobytes => 1024,
            _ => parse_block_size(env.block_size.as_deref()),
        };

        Self {
            display,
            recursive: args.recursive,
            directories_as_files: args.directory,
            visibility,
            sort,
            reverse: args.reverse,
            time_field,
            size_units,
            show_blocks: args.blocks,
            show_inode: args.inode,
            type_suffix: args.classify,
            escaping,
            terminal_width: args.width.unwrap_or(env.terminal_width),
            block_size,
            interactive: env.interactive,
            pwd: env.pwd.clone(),
        }
    }

    pub fn is_long(&self) -> bool {
        matches!(self.display, RenderMode::Long(_))
    }

    /// Directory batches open with a `total` line in long format, and for
    /// `-s` when writing to a terminal.
    pub fn shows_total(&self) -> bool {
        self.is_long() || (self.show_blocks && self.interactive)
    }

    pub fn sorter(&self) -> Option<Sorter> {
        self.sort.map(|key| Sorter::new(key, self.reverse))
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            recursive: self.recursive,
            visibility: self.visibility,
            sorter: self.sorter(),
        }
    }

    /// Block count as displayed: 512-byte blocks rescaled to the divisor,
    /// rounded up.
    pub fn scaled_blocks(&self, blocks: u64) -> u64 {
        (blocks * 512).div_ceil(self.block_size)
    }
}

/// `BLOCKSIZE` as a divisor; zero or non-numeric values fall back to 512.
fn parse_block_size(raw: Option<&str>) -> u64 {
    match raw.map(|s| s.trim().parse::<u64>()) {
        Some(Ok(n)) if n > 0 => n,
        _ => DEFAULT_BLOCK_SIZE,
    }
}
