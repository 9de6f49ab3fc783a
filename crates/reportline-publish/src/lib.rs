//! reportline-publish: Date-partitioned publishing of processed reports
//!
//! A report dated `DD/MM/YYYY` is transformed by the core pipeline, then
//! pasted into group `YYYY`, subgroup `MM - 1` of a [`DestinationStore`],
//! unless that subgroup already records a later report date.
//!
//! [`DestinationStore`]: reportline_store::DestinationStore

pub mod error;
pub mod partition;
pub mod publisher;
pub mod staleness;

pub use error::{PublishError, StoreOp};
pub use partition::{Partition, resolve_partition};
pub use publisher::{PublishOutcome, Publisher, upload_text};
pub use staleness::{METADATA_LABEL, METADATA_RANGE, is_fresh_enough, stored_date};
