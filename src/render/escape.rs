//! Byte-level escaping of names, paths, and link targets.

use std::borrow::Cow;
use std::ffi::OsStr;

use unicode_width::UnicodeWidthStr;

use crate::config::Escaping;

impl Escaping {
    /// Bytes as written to the output under this policy.
    pub fn apply<'a>(self, raw: &'a OsStr) -> Cow<'a, [u8]> {
        let bytes = raw.as_encoded_bytes();
        match self {
            Escaping::Literal => Cow::Borrowed(bytes),
            Escaping::Substitute => Cow::Owned(substitute(bytes).into_bytes()),
            Escaping::CaretOctal => Cow::Owned(caret_octal(bytes)),
        }
    }

    /// Width used by the pre-render scan. Caret/octal expansion is not
    /// predicted here; the renderer widens the column when it happens.
    pub fn scan_width(self, raw: &OsStr) -> usize {
        match self {
            Escaping::Substitute => substitute(raw.as_encoded_bytes()).width(),
            Escaping::Literal | Escaping::CaretOctal => display_width(raw.as_encoded_bytes()),
        }
    }
}

/// Terminal columns taken by `bytes`, decoding invalid UTF-8 lossily.
pub fn display_width(bytes: &[u8]) -> usize {
    String::from_utf8_lossy(bytes).width()
}

/// Replace every control character and undecodable byte with `?`.
fn substitute(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .map(|c| {
            if c.is_control() || c == char::REPLACEMENT_CHARACTER {
                '?'
            } else {
                c
            }
        })
        .collect()
}

/// `^A`..`^_` for bytes 1-31, `\ooo` for bytes >= 127.
fn caret_octal(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            1..=31 => {
                out.push(b'^');
                out.push(b + b'A' - 1);
            }
            127..=255 => out.extend_from_slice(format!("\\{b:o}").as_bytes()),
            _ => out.push(b),
        }
    }
    out
}
