use std::cmp::Ordering;
use std::ffi::OsStr;

use super::Entry;
use crate::metadata::TimeField;

/// Primary sort key for directory children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Size,
    Time(TimeField),
}

/// Total order over entries.
///
/// Names compare byte-wise (case-sensitive) ascending; reversed, they
/// compare case-insensitively with the operands swapped. Size and time keys
/// are largest/newest first, smallest/oldest first when reversed. No
/// secondary key breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sorter {
    pub key: SortKey,
    pub reverse: bool,
}

impl Sorter {
    pub fn new(key: SortKey, reverse: bool) -> Self {
        Self { key, reverse }
    }

    /// Ordering for command-line operands: always by name.
    pub fn operands(reverse: bool) -> Self {
        Self::new(SortKey::Name, reverse)
    }

    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        match self.key {
            SortKey::Name => self.compare_names(&a.name, &b.name),
            SortKey::Size => self.numeric(a.metadata.size, b.metadata.size),
            SortKey::Time(field) => self.numeric(a.metadata.time(field), b.metadata.time(field)),
        }
    }

    pub fn compare_names(&self, a: &OsStr, b: &OsStr) -> Ordering {
        let (a, b) = (a.as_encoded_bytes(), b.as_encoded_bytes());
        if self.reverse {
            caseless(b).cmp(caseless(a))
        } else {
            a.cmp(b)
        }
    }

    pub fn sort(&self, entries: &mut [Entry]) {
        entries.sort_unstable_by(|a, b| self.compare(a, b));
    }

    fn numeric<T: Ord>(&self, a: T, b: T) -> Ordering {
        if self.reverse {
            a.cmp(&b)
        } else {
            b.cmp(&a)
        }
    }
}

fn caseless(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes.iter().map(u8::to_ascii_lowercase)
}
