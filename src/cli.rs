use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "lsr",
    version,
    about = "List directory contents",
    disable_help_flag = true,
    args_override_self = true,
    after_help = "Examples:\n  lsr -l /etc\n  lsr -laR src\n  lsr -Ch --width 120"
)]
pub struct Args {
    /// Files and directories to list (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Include dot files, including `.` and `..`
    #[arg(short = 'a', overrides_with_all = ["almost_all", "directory"])]
    pub all: bool,

    /// Include dot files, except `.` and `..`
    #[arg(short = 'A', overrides_with_all = ["all", "directory"])]
    pub almost_all: bool,

    /// List directories themselves, not their contents
    #[arg(short = 'd', overrides_with_all = ["all", "almost_all"])]
    pub directory: bool,

    /// List subdirectories recursively
    #[arg(short = 'R')]
    pub recursive: bool,

    /// Long format
    #[arg(short = 'l', overrides_with_all = ["numeric", "one", "columns", "across"])]
    pub long: bool,

    /// Long format with numeric owner and group ids
    #[arg(short = 'n', overrides_with_all = ["long", "one", "columns", "across"])]
    pub numeric: bool,

    /// One entry per line
    #[arg(short = '1', overrides_with_all = ["long", "numeric", "columns", "across"])]
    pub one: bool,

    /// Multi-column output
    #[arg(short = 'C', overrides_with_all = ["long", "numeric", "one", "across"])]
    pub columns: bool,

    /// Multi-column output (same layout as -C)
    #[arg(short = 'x', overrides_with_all = ["long", "numeric", "one", "columns"])]
    pub across: bool,

    /// Append a type indicator (one of */=@%|) to entries
    #[arg(short = 'F')]
    pub classify: bool,

    /// Do not sort; list entries in directory order
    #[arg(short = 'f')]
    pub unsorted: bool,

    /// Sort by size, largest first
    #[arg(short = 'S', overrides_with = "time_sort")]
    pub size_sort: bool,

    /// Sort by time, newest first
    #[arg(short = 't', overrides_with = "size_sort")]
    pub time_sort: bool,

    /// Reverse the sort order
    #[arg(short = 'r')]
    pub reverse: bool,

    /// Use status change time for sorting and display
    #[arg(short = 'c', overrides_with = "atime")]
    pub ctime: bool,

    /// Use last access time for sorting and display
    #[arg(short = 'u', overrides_with = "ctime")]
    pub atime: bool,

    /// Human-readable sizes (K, M, G, T, P)
    #[arg(short = 'h', overrides_with = "kilobytes")]
    pub human: bool,

    /// Count blocks in kilobytes
    #[arg(short = 'k', overrides_with = "human")]
    pub kilobytes: bool,

    /// Print each entry's inode number
    #[arg(short = 'i')]
    pub inode: bool,

    /// Print each entry's allocated block count
    #[arg(short = 's')]
    pub blocks: bool,

    /// Replace non-printable characters with `?`
    #[arg(short = 'q', overrides_with = "escape")]
    pub substitute: bool,

    /// Escape control characters as ^X and high bytes as octal
    #[arg(short = 'w', overrides_with = "substitute")]
    pub escape: bool,

    /// Terminal width in columns for multi-column output
    #[arg(long = "width", value_name = "COLS")]
    pub width: Option<usize>,

    /// Increase diagnostic logging on stderr (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Print help
    #[arg(long = "help", action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        if self.width == Some(0) {
            self.width = None;
        }
        self
    }
}
