//! Reportline Core - report model and section transformation pipeline
//!
//! Turns one flat, comma-delimited report into named sections, runs each
//! section through the transform registered for it, and reassembles the
//! output in the order the sections were first seen.

pub mod error;
pub mod logging;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod section;

// Re-exports for convenience
pub use error::{DateParseError, TransformError};
pub use logging::init_logging;
pub use pipeline::ReportPipeline;
pub use registry::{DispatchRegistry, Identity, SectionTransform, normalize_key};
pub use report::{Report, ReportDate, ReportKind};
pub use section::{CELL_SEPARATOR, ROW_SEPARATOR, Section, Sections, join, split};
