//! Store error type

use std::path::PathBuf;

/// Failure of a single store call.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialization {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidGroupName(String),
    GroupNotFound(String),
    GroupExists(String),
    SubgroupNotFound {
        group: String,
        id: i32,
    },
    SubgroupExists {
        group: String,
        id: i32,
    },
    InvalidRange(String),
    /// Backend refused or could not serve the request.
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "IO error on {}: {source}", path.display()),
            Self::Serialization { path, source } => {
                write!(f, "corrupt workbook {}: {source}", path.display())
            }
            Self::InvalidGroupName(name) => write!(f, "invalid group name '{name}'"),
            Self::GroupNotFound(name) => write!(f, "group '{name}' not found"),
            Self::GroupExists(name) => write!(f, "group '{name}' already exists"),
            Self::SubgroupNotFound { group, id } => {
                write!(f, "subgroup {id} not found in group '{group}'")
            }
            Self::SubgroupExists { group, id } => {
                write!(f, "subgroup {id} already exists in group '{group}'")
            }
            Self::InvalidRange(range) => write!(f, "invalid range '{range}'"),
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
