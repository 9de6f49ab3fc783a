//! reportline-store: Date-partitioned destination store for published reports
//!
//! Reports land in workbooks (one per year) made of monthly subgroups,
//! each a 2-D grid of text cells. [`DestinationStore`] is the capability
//! the publisher consumes; [`FsStore`] keeps workbooks as JSON files on
//! disk and [`MemoryStore`] keeps them in memory, recording every call.

pub mod capability;
pub mod error;
pub mod fs_store;
pub mod hash;
pub mod memory;
pub mod range;
pub mod workbook;

pub use capability::{DestinationStore, GroupHandle, StoreRequest, SubgroupInfo};
pub use error::StoreError;
pub use fs_store::{FsStore, VerifyResult};
pub use memory::{CallKind, MemoryStore, StoreCall};
pub use range::{CellRef, RangeSpec};
pub use workbook::{PLACEHOLDER_SUBGROUP_ID, Subgroup, Workbook};
