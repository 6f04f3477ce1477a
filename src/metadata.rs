//! OS metadata snapshots and the lookup source behind them.

use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use uzers::{Groups, Users, UsersCache};

use crate::error::{LsError, Result};

const S_IFMT: u32 = 0o170_000;
const S_IFWHT: u32 = 0o160_000;
const S_IFSOCK: u32 = 0o140_000;
const S_IFLNK: u32 = 0o120_000;
const S_IFREG: u32 = 0o100_000;
const S_IFBLK: u32 = 0o060_000;
const S_IFDIR: u32 = 0o040_000;
const S_IFCHR: u32 = 0o020_000;
const S_IFIFO: u32 = 0o010_000;

/// Kind of filesystem object, decoded from the mode's type bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    Symlink,
    CharDevice,
    BlockDevice,
    Fifo,
    Socket,
    Whiteout,
    Unknown,
}

impl FileKind {
    pub fn from_mode(mode: u32) -> Self {
        match mode & S_IFMT {
            S_IFREG => Self::Regular,
            S_IFDIR => Self::Directory,
            S_IFLNK => Self::Symlink,
            S_IFCHR => Self::CharDevice,
            S_IFBLK => Self::BlockDevice,
            S_IFIFO => Self::Fifo,
            S_IFSOCK => Self::Socket,
            S_IFWHT => Self::Whiteout,
            _ => Self::Unknown,
        }
    }

    /// First character of the permission string.
    pub fn type_char(self) -> char {
        match self {
            Self::Regular => '-',
            Self::Directory => 'd',
            Self::Symlink => 'l',
            Self::CharDevice => 'c',
            Self::BlockDevice => 'b',
            Self::Fifo => 'p',
            Self::Socket => 's',
            Self::Whiteout => 'w',
            Self::Unknown => '?',
        }
    }
}

/// Which of the three timestamps a listing reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeField {
    Accessed,
    #[default]
    Modified,
    Changed,
}

/// Owned stat snapshot, captured once when an entry is visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryMetadata {
    pub ino: u64,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    /// Allocated 512-byte blocks.
    pub blocks: u64,
    pub rdev: u64,
    pub mode: u32,
    pub atime: i64,
    pub mtime: i64,
    pub ctime: i64,
}

impl From<&Metadata> for EntryMetadata {
    fn from(md: &Metadata) -> Self {
        Self {
            ino: md.ino(),
            nlink: md.nlink(),
            uid: md.uid(),
            gid: md.gid(),
            size: md.size(),
            blocks: md.blocks(),
            rdev: md.rdev(),
            mode: md.mode(),
            atime: md.atime(),
            mtime: md.mtime(),
            ctime: md.ctime(),
        }
    }
}

impl EntryMetadata {
    pub fn kind(&self) -> FileKind {
        FileKind::from_mode(self.mode)
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == FileKind::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.kind() == FileKind::Symlink
    }

    pub fn is_device(&self) -> bool {
        matches!(self.kind(), FileKind::CharDevice | FileKind::BlockDevice)
    }

    pub fn major(&self) -> u64 {
        libc::major(self.rdev as libc::dev_t) as u64
    }

    pub fn minor(&self) -> u64 {
        libc::minor(self.rdev as libc::dev_t) as u64
    }

    pub fn time(&self, field: TimeField) -> i64 {
        match field {
            TimeField::Accessed => self.atime,
            TimeField::Modified => self.mtime,
            TimeField::Changed => self.ctime,
        }
    }

    /// `strmode`-style permission string: type character plus nine
    /// permission characters, with setuid/setgid/sticky folded in.
    pub fn permission_string(&self) -> String {
        let mode = self.mode;
        let bit = |mask: u32, c: char| if mode & mask != 0 { c } else { '-' };
        let special = |exec: u32, flag: u32, set: char, unset: char| {
            match (mode & exec != 0, mode & flag != 0) {
                (true, true) => set,
                (false, true) => unset,
                (true, false) => 'x',
                (false, false) => '-',
            }
        };

        let mut out = String::with_capacity(10);
        out.push(self.kind().type_char());
        out.push(bit(0o400, 'r'));
        out.push(bit(0o200, 'w'));
        out.push(special(0o100, 0o4000, 's', 'S'));
        out.push(bit(0o040, 'r'));
        out.push(bit(0o020, 'w'));
        out.push(special(0o010, 0o2000, 's', 'S'));
        out.push(bit(0o004, 'r'));
        out.push(bit(0o002, 'w'));
        out.push(special(0o001, 0o1000, 't', 'T'));
        out
    }

    /// Single-character type marker for `-F`, or `None` for plain files.
    pub fn type_suffix(&self) -> Option<char> {
        match self.kind() {
            FileKind::Directory => Some('/'),
            FileKind::Symlink => Some('@'),
            FileKind::Fifo => Some('|'),
            FileKind::Socket => Some('='),
            FileKind::Whiteout => Some('%'),
            _ if self.mode & 0o111 == 0o111 => Some('*'),
            _ => None,
        }
    }
}

/// Whether owner and group print as names or raw ids in long format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerFormat {
    #[default]
    Named,
    Numeric,
}

/// Abstraction over OS metadata lookups so listings can run against fakes.
pub trait MetadataSource {
    /// `lstat`: never follows a final symlink.
    fn symlink_metadata(&self, path: &Path) -> Result<EntryMetadata>;
    fn read_link(&self, path: &Path) -> Result<PathBuf>;
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;
    fn user_name(&self, uid: u32) -> Option<String>;
    fn group_name(&self, gid: u32) -> Option<String>;
}

/// Default `MetadataSource` backed by std and a cached passwd/group database.
pub struct SystemMetadata {
    identities: UsersCache,
}

impl SystemMetadata {
    pub fn new() -> Self {
        Self {
            identities: UsersCache::new(),
        }
    }
}

impl Default for SystemMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataSource for SystemMetadata {
    fn symlink_metadata(&self, path: &Path) -> Result<EntryMetadata> {
        std::fs::symlink_metadata(path)
            .map(|md| EntryMetadata::from(&md))
            .map_err(|source| LsError::Stat {
                path: path.to_path_buf(),
                source,
            })
    }

    fn read_link(&self, path: &Path) -> Result<PathBuf> {
        std::fs::read_link(path).map_err(|source| LsError::ReadLink {
            path: path.to_path_buf(),
            source,
        })
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        std::fs::canonicalize(path).map_err(|source| LsError::Resolve {
            path: path.to_path_buf(),
            source,
        })
    }

    fn user_name(&self, uid: u32) -> Option<String> {
        self.identities
            .get_user_by_uid(uid)
            .map(|u| u.name().to_string_lossy().into_owned())
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        self.identities
            .get_group_by_gid(gid)
            .map(|g| g.name().to_string_lossy().into_owned())
    }
}

/// Owner column text; unresolvable ids degrade to the number.
pub fn user_label(source: &dyn MetadataSource, uid: u32, format: OwnerFormat) -> String {
    match format {
        OwnerFormat::Numeric => uid.to_string(),
        OwnerFormat::Named => source.user_name(uid).unwrap_or_else(|| uid.to_string()),
    }
}

/// Group column text; unresolvable ids degrade to the number.
pub fn group_label(source: &dyn MetadataSource, gid: u32, format: OwnerFormat) -> String {
    match format {
        OwnerFormat::Numeric => gid.to_string(),
        OwnerFormat::Named => source.group_name(gid).unwrap_or_else(|| gid.to_string()),
    }
}
