use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of a listing run. Every variant aborts the run; there is
/// no partial-result continuation.
#[derive(Error, Debug)]
pub enum LsError {
    #[error("{}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("readlink {}: {source}", path.display())]
    ReadLink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("realpath {}: {source}", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write error: {0}")]
    Output(#[from] std::io::Error),
}

impl LsError {
    /// The path this error occurred at, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Stat { path, .. }
            | Self::Walk { path, .. }
            | Self::ReadLink { path, .. }
            | Self::Resolve { path, .. } => Some(path),
            Self::Output(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LsError>;
