//! Guard against overwriting a subgroup with older data

use reportline_core::ReportDate;
use reportline_store::{DestinationStore, GroupHandle, RangeSpec};

use crate::error::{PublishError, StoreOp};

/// Metadata cells at the top of every subgroup: label, then report date.
pub const METADATA_RANGE: &str = "A1:B1";

/// Label written next to the report date in the metadata row.
pub const METADATA_LABEL: &str = "Report date";

/// Date currently recorded in the subgroup, if any.
pub fn stored_date<S>(
    store: &S,
    group: &GroupHandle,
    subgroup_id: i32,
) -> Result<Option<ReportDate>, PublishError>
where
    S: DestinationStore + ?Sized,
{
    let range = RangeSpec::parse(METADATA_RANGE)
        .map_err(PublishError::store(StoreOp::ReadRange))?;
    let values = store
        .read_range(group, subgroup_id, &range)
        .map_err(PublishError::store(StoreOp::ReadRange))?;

    let cell = values
        .as_ref()
        .and_then(|rows| rows.first())
        .and_then(|row| row.get(1));
    match cell {
        Some(text) => Ok(Some(ReportDate::parse(text)?)),
        None => Ok(None),
    }
}

/// True when a report dated `report_date` may overwrite the subgroup:
/// nothing is recorded yet, or the recorded date is not later.
pub fn is_fresh_enough<S>(
    store: &S,
    report_date: ReportDate,
    group: &GroupHandle,
    subgroup_id: i32,
) -> Result<bool, PublishError>
where
    S: DestinationStore + ?Sized,
{
    let fresh = match stored_date(store, group, subgroup_id)? {
        Some(stored) => {
            log::debug!("{group}/{subgroup_id}: stored {stored}, incoming {report_date}");
            report_date >= stored
        }
        None => {
            log::debug!("{group}/{subgroup_id}: no recorded date");
            true
        }
    };
    Ok(fresh)
}
