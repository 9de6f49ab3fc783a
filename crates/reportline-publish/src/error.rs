//! Publish error taxonomy

use std::fmt;

use reportline_core::{DateParseError, TransformError};
use reportline_store::StoreError;

/// Store operation that failed during a publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    FindGroup,
    CreateGroup,
    ListSubgroups,
    BatchUpdate,
    ReadRange,
    WriteRange,
}

impl StoreOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FindGroup => "find_group",
            Self::CreateGroup => "create_group",
            Self::ListSubgroups => "list_subgroups",
            Self::BatchUpdate => "batch_update",
            Self::ReadRange => "read_range",
            Self::WriteRange => "write_range",
        }
    }
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of one publish attempt. Nothing is retried here.
#[derive(Debug)]
pub enum PublishError {
    /// A section transform failed; nothing reached the store.
    Transform(TransformError),
    /// A store call failed.
    Store { op: StoreOp, source: StoreError },
    /// The date recorded in the subgroup is not `DD/MM/YYYY`.
    DateParse(DateParseError),
}

impl PublishError {
    pub(crate) fn store(op: StoreOp) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { op, source }
    }
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transform(e) => write!(f, "{e}"),
            Self::Store { op, source } => write!(f, "store {op} failed: {source}"),
            Self::DateParse(e) => write!(f, "stored report date unreadable: {e}"),
        }
    }
}

impl std::error::Error for PublishError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transform(e) => Some(e),
            Self::Store { source, .. } => Some(source),
            Self::DateParse(e) => Some(e),
        }
    }
}

impl From<TransformError> for PublishError {
    fn from(e: TransformError) -> Self {
        Self::Transform(e)
    }
}

impl From<DateParseError> for PublishError {
    fn from(e: DateParseError) -> Self {
        Self::DateParse(e)
    }
}
