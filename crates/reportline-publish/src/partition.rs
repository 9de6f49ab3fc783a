//! Year/month partition lookup and creation
//!
//! A report dated `DD/MM/YYYY` lands in group `YYYY`, subgroup id
//! `MM - 1`. Both are created on first use. The first real subgroup of
//! a group replaces the store's placeholder subgroup in one batch.

use reportline_core::ReportDate;
use reportline_store::{DestinationStore, GroupHandle, StoreRequest};

use crate::error::{PublishError, StoreOp};

/// Resolved destination of one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub group: GroupHandle,
    pub subgroup_id: i32,
    /// True when this call created the subgroup.
    pub created: bool,
}

/// Find or create the group and subgroup for `date`.
///
/// Subgroups match on numeric id only; the `MM/YYYY` title is used just
/// at creation. There is no lock around the check-then-create sequence:
/// two publishers racing on the same month can both create.
pub fn resolve_partition<S>(store: &S, date: ReportDate) -> Result<Partition, PublishError>
where
    S: DestinationStore + ?Sized,
{
    let group_name = date.year_label();
    let group = match store
        .find_group(&group_name)
        .map_err(PublishError::store(StoreOp::FindGroup))?
    {
        Some(group) => group,
        None => {
            let group = store
                .create_group(&group_name)
                .map_err(PublishError::store(StoreOp::CreateGroup))?;
            log::info!("Created group {group}");
            group
        }
    };

    let subgroup_id = date.subgroup_id();
    let subgroups = store
        .list_subgroups(&group)
        .map_err(PublishError::store(StoreOp::ListSubgroups))?;

    let mut placeholder = None;
    for subgroup in &subgroups {
        if subgroup.id == subgroup_id {
            log::debug!("{group}: found subgroup {subgroup_id} '{}'", subgroup.title);
            return Ok(Partition {
                group,
                subgroup_id,
                created: false,
            });
        }
        if placeholder.is_none() && subgroup.title == store.placeholder_title() {
            placeholder = Some(subgroup.id);
        }
    }
    log::debug!(
        "{group}: no subgroup {subgroup_id} among {} (placeholder: {placeholder:?})",
        subgroups.len()
    );

    let title = date.month_year();
    let mut requests = vec![StoreRequest::CreateSubgroup {
        id: subgroup_id,
        title: title.clone(),
    }];
    if let Some(id) = placeholder {
        requests.push(StoreRequest::DeleteSubgroup { id });
    }
    store
        .batch_update(&group, &requests)
        .map_err(PublishError::store(StoreOp::BatchUpdate))?;
    log::info!("Created subgroup {subgroup_id} '{title}' in {group}");

    Ok(Partition {
        group,
        subgroup_id,
        created: true,
    })
}
