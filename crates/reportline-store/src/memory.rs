//! In-memory destination store
//!
//! Keeps workbooks in a map and records every capability call in order,
//! so callers can assert on exactly what reached the store. Individual
//! call kinds can be made to fail for fault-injection.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use crate::capability::{DestinationStore, GroupHandle, StoreRequest, SubgroupInfo};
use crate::error::StoreError;
use crate::range::RangeSpec;
use crate::workbook::Workbook;

/// Kind of a recorded store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    FindGroup,
    CreateGroup,
    ListSubgroups,
    BatchUpdate,
    ReadRange,
}

/// One recorded call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    FindGroup(String),
    CreateGroup(String),
    ListSubgroups(String),
    BatchUpdate {
        group: String,
        requests: Vec<StoreRequest>,
    },
    ReadRange {
        group: String,
        subgroup_id: i32,
        range: RangeSpec,
    },
}

impl StoreCall {
    pub fn kind(&self) -> CallKind {
        match self {
            Self::FindGroup(_) => CallKind::FindGroup,
            Self::CreateGroup(_) => CallKind::CreateGroup,
            Self::ListSubgroups(_) => CallKind::ListSubgroups,
            Self::BatchUpdate { .. } => CallKind::BatchUpdate,
            Self::ReadRange { .. } => CallKind::ReadRange,
        }
    }
}

#[derive(Default)]
struct State {
    workbooks: BTreeMap<String, Workbook>,
    calls: Vec<StoreCall>,
    fail_on: HashSet<CallKind>,
}

pub struct MemoryStore {
    placeholder_title: String,
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new(placeholder_title: &str) -> Self {
        Self {
            placeholder_title: placeholder_title.to_string(),
            state: Mutex::new(State::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record `call`, then fail it if its kind was armed with [`fail_on`](Self::fail_on).
    fn record(&self, state: &mut State, call: StoreCall) -> Result<(), StoreError> {
        let kind = call.kind();
        state.calls.push(call);
        if state.fail_on.contains(&kind) {
            return Err(StoreError::Unavailable(format!("{kind:?} rejected")));
        }
        Ok(())
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Make every later call of `kind` fail with [`StoreError::Unavailable`].
    pub fn fail_on(&self, kind: CallKind) {
        self.state().fail_on.insert(kind);
    }

    /// Snapshot of a workbook.
    pub fn workbook(&self, name: &str) -> Option<Workbook> {
        self.state().workbooks.get(name).cloned()
    }

    pub fn group_names(&self) -> Vec<String> {
        self.state().workbooks.keys().cloned().collect()
    }
}

impl DestinationStore for MemoryStore {
    fn placeholder_title(&self) -> &str {
        &self.placeholder_title
    }

    fn find_group(&self, name: &str) -> Result<Option<GroupHandle>, StoreError> {
        let mut state = self.state();
        self.record(&mut state, StoreCall::FindGroup(name.to_string()))?;
        Ok(state
            .workbooks
            .contains_key(name)
            .then(|| GroupHandle::new(name)))
    }

    fn create_group(&self, name: &str) -> Result<GroupHandle, StoreError> {
        let mut state = self.state();
        self.record(&mut state, StoreCall::CreateGroup(name.to_string()))?;
        if state.workbooks.contains_key(name) {
            return Err(StoreError::GroupExists(name.to_string()));
        }
        state
            .workbooks
            .insert(name.to_string(), Workbook::new(name, &self.placeholder_title));
        Ok(GroupHandle::new(name))
    }

    fn list_subgroups(&self, group: &GroupHandle) -> Result<Vec<SubgroupInfo>, StoreError> {
        let mut state = self.state();
        self.record(&mut state, StoreCall::ListSubgroups(group.to_string()))?;
        state
            .workbooks
            .get(group.as_str())
            .map(Workbook::infos)
            .ok_or_else(|| StoreError::GroupNotFound(group.to_string()))
    }

    fn batch_update(
        &self,
        group: &GroupHandle,
        requests: &[StoreRequest],
    ) -> Result<(), StoreError> {
        let mut state = self.state();
        self.record(
            &mut state,
            StoreCall::BatchUpdate {
                group: group.to_string(),
                requests: requests.to_vec(),
            },
        )?;
        let next = state
            .workbooks
            .get(group.as_str())
            .ok_or_else(|| StoreError::GroupNotFound(group.to_string()))?
            .applied(requests)?;
        state.workbooks.insert(group.to_string(), next);
        Ok(())
    }

    fn read_range(
        &self,
        group: &GroupHandle,
        subgroup_id: i32,
        range: &RangeSpec,
    ) -> Result<Option<Vec<Vec<String>>>, StoreError> {
        let mut state = self.state();
        self.record(
            &mut state,
            StoreCall::ReadRange {
                group: group.to_string(),
                subgroup_id,
                range: *range,
            },
        )?;
        let workbook = state
            .workbooks
            .get(group.as_str())
            .ok_or_else(|| StoreError::GroupNotFound(group.to_string()))?;
        let subgroup = workbook
            .subgroup(subgroup_id)
            .ok_or_else(|| StoreError::SubgroupNotFound {
                group: group.to_string(),
                id: subgroup_id,
            })?;
        Ok(subgroup.read(range))
    }
}
