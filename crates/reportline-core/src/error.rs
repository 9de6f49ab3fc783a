//! Error types for report parsing and section transformation

/// A date string that is not in the strict `DD/MM/YYYY` form,
/// or that names a day which does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    pub input: String,
    pub reason: &'static str,
}

impl std::fmt::Display for DateParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for DateParseError {}

/// A registered section transform failed.
///
/// Carries the raw section name so the caller can tell which page of the
/// report broke. Aborts processing of the whole report.
#[derive(Debug)]
pub struct TransformError {
    pub section: String,
    pub source: anyhow::Error,
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "transform of section '{}' failed: {}", self.section, self.source)
    }
}

impl std::error::Error for TransformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}
