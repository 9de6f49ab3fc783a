//! Destination store capability consumed by the publisher

use std::fmt;

use crate::error::StoreError;
use crate::range::{CellRef, RangeSpec};

/// Opaque reference to a yearly group (workbook) inside a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupHandle(String);

impl GroupHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupHandle {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for GroupHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Id and title of one subgroup, as listed by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubgroupInfo {
    pub id: i32,
    pub title: String,
}

/// One mutation inside a batch update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    CreateSubgroup {
        id: i32,
        title: String,
    },
    DeleteSubgroup {
        id: i32,
    },
    /// Paste literal values starting at `top_left`, overwriting every cell
    /// the text covers. Rows split on `\n`, cells on `delimiter`.
    PasteValues {
        subgroup_id: i32,
        top_left: CellRef,
        text: String,
        delimiter: char,
    },
}

/// Read/write primitives of a date-partitioned destination store.
///
/// Every call is blocking. Implementations apply a batch all-or-nothing.
pub trait DestinationStore {
    /// Title of the placeholder subgroup a freshly created group contains.
    fn placeholder_title(&self) -> &str;

    /// Group with exactly this name, if one exists.
    fn find_group(&self, name: &str) -> Result<Option<GroupHandle>, StoreError>;

    fn create_group(&self, name: &str) -> Result<GroupHandle, StoreError>;

    /// Subgroups of `group` in store order (the order they were created in).
    fn list_subgroups(&self, group: &GroupHandle) -> Result<Vec<SubgroupInfo>, StoreError>;

    /// Apply every request, or none of them.
    fn batch_update(
        &self,
        group: &GroupHandle,
        requests: &[StoreRequest],
    ) -> Result<(), StoreError>;

    /// Values inside `range`, or `None` when every cell there is empty.
    /// Trailing empty cells and rows are trimmed.
    fn read_range(
        &self,
        group: &GroupHandle,
        subgroup_id: i32,
        range: &RangeSpec,
    ) -> Result<Option<Vec<Vec<String>>>, StoreError>;

    fn create_subgroup(&self, group: &GroupHandle, id: i32, title: &str) -> Result<(), StoreError> {
        self.batch_update(
            group,
            &[StoreRequest::CreateSubgroup {
                id,
                title: title.to_string(),
            }],
        )
    }

    fn delete_subgroup(&self, group: &GroupHandle, id: i32) -> Result<(), StoreError> {
        self.batch_update(group, &[StoreRequest::DeleteSubgroup { id }])
    }

    fn write_range(
        &self,
        group: &GroupHandle,
        subgroup_id: i32,
        top_left: CellRef,
        text: &str,
        delimiter: char,
    ) -> Result<(), StoreError> {
        self.batch_update(
            group,
            &[StoreRequest::PasteValues {
                subgroup_id,
                top_left,
                text: text.to_string(),
                delimiter,
            }],
        )
    }
}

impl<S: DestinationStore + ?Sized> DestinationStore for &S {
    fn placeholder_title(&self) -> &str {
        (**self).placeholder_title()
    }

    fn find_group(&self, name: &str) -> Result<Option<GroupHandle>, StoreError> {
        (**self).find_group(name)
    }

    fn create_group(&self, name: &str) -> Result<GroupHandle, StoreError> {
        (**self).create_group(name)
    }

    fn list_subgroups(&self, group: &GroupHandle) -> Result<Vec<SubgroupInfo>, StoreError> {
        (**self).list_subgroups(group)
    }

    fn batch_update(
        &self,
        group: &GroupHandle,
        requests: &[StoreRequest],
    ) -> Result<(), StoreError> {
        (**self).batch_update(group, requests)
    }

    fn read_range(
        &self,
        group: &GroupHandle,
        subgroup_id: i32,
        range: &RangeSpec,
    ) -> Result<Option<Vec<Vec<String>>>, StoreError> {
        (**self).read_range(group, subgroup_id, range)
    }
}
