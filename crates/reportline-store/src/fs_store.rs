//! Filesystem-backed destination store
//!
//! Directory layout:
//! ```text
//! {base}/
//! └── {root_folder}/          # e.g. "Financial Reports"
//!     ├── 2024.json           # one workbook per yearly group
//!     └── 2025.json
//! ```
//!
//! Every batch update rewrites the workbook through `{group}.json.tmp`
//! followed by an atomic rename, so a failed batch leaves the previous
//! file in place.

use std::fs;
use std::path::{Path, PathBuf};

use crate::capability::{DestinationStore, GroupHandle, StoreRequest, SubgroupInfo};
use crate::error::StoreError;
use crate::range::RangeSpec;
use crate::workbook::Workbook;

/// Verification result for a single subgroup.
#[derive(Debug)]
pub struct VerifyResult {
    pub subgroup_id: i32,
    pub title: String,
    pub expected: String,
    pub actual: String,
    pub ok: bool,
}

/// Destination store keeping one JSON workbook per group.
pub struct FsStore {
    root: PathBuf,
    placeholder_title: String,
}

impl FsStore {
    /// Open (creating if needed) the store at `base/root_folder`.
    pub fn new(base: &Path, root_folder: &str, placeholder_title: &str) -> Result<Self, StoreError> {
        let root = base.join(root_folder);
        fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        log::debug!("store root: {}", root.display());
        Ok(Self {
            root,
            placeholder_title: placeholder_title.to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn workbook_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\'])
            && !name.ends_with(".tmp");
        if !valid {
            return Err(StoreError::InvalidGroupName(name.to_string()));
        }
        Ok(self.root.join(format!("{name}.json")))
    }

    /// Read the workbook behind `group`.
    pub fn load(&self, group: &str) -> Result<Workbook, StoreError> {
        let path = self.workbook_path(group)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::GroupNotFound(group.to_string()));
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };
        serde_json::from_str(&json).map_err(|source| StoreError::Serialization { path, source })
    }

    fn save(&self, workbook: &Workbook) -> Result<(), StoreError> {
        let path = self.workbook_path(&workbook.name)?;
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(workbook).map_err(|source| {
            StoreError::Serialization {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::io(&path, e))?;
        Ok(())
    }

    /// Names of all groups, sorted.
    pub fn list_groups(&self) -> Result<Vec<String>, StoreError> {
        let pattern = format!(
            "{}/*.json",
            glob::Pattern::escape(&self.root.to_string_lossy())
        );

        let entries = glob::glob(&pattern).map_err(|e| {
            StoreError::io(
                &self.root,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()),
            )
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|p| p.is_file())
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Recompute every subgroup hash of `group` against the stored ones.
    pub fn verify(&self, group: &str) -> Result<Vec<VerifyResult>, StoreError> {
        let workbook = self.load(group)?;
        Ok(workbook
            .subgroups
            .iter()
            .map(|s| {
                let (actual, ok) = s.verify();
                VerifyResult {
                    subgroup_id: s.id,
                    title: s.title.clone(),
                    expected: s.content_hash.clone(),
                    actual,
                    ok,
                }
            })
            .collect())
    }

    /// Remove leftover `.json.tmp` files from interrupted writes.
    pub fn cleanup_tmp(&self) -> Result<usize, StoreError> {
        let mut count = 0;
        for entry in fs::read_dir(&self.root).map_err(|e| StoreError::io(&self.root, e))? {
            let entry = entry.map_err(|e| StoreError::io(&self.root, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".json.tmp") && entry.path().is_file() {
                log::info!("cleaning stale tmp: {name}");
                fs::remove_file(entry.path()).map_err(|e| StoreError::io(entry.path(), e))?;
                count += 1;
            }
        }
        Ok(count)
    }
}

impl DestinationStore for FsStore {
    fn placeholder_title(&self) -> &str {
        &self.placeholder_title
    }

    fn find_group(&self, name: &str) -> Result<Option<GroupHandle>, StoreError> {
        let path = self.workbook_path(name)?;
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(Some(GroupHandle::new(name))),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    fn create_group(&self, name: &str) -> Result<GroupHandle, StoreError> {
        let path = self.workbook_path(name)?;
        if path.exists() {
            return Err(StoreError::GroupExists(name.to_string()));
        }
        self.save(&Workbook::new(name, &self.placeholder_title))?;
        log::info!("store: created group '{name}'");
        Ok(GroupHandle::new(name))
    }

    fn list_subgroups(&self, group: &GroupHandle) -> Result<Vec<SubgroupInfo>, StoreError> {
        Ok(self.load(group.as_str())?.infos())
    }

    fn batch_update(
        &self,
        group: &GroupHandle,
        requests: &[StoreRequest],
    ) -> Result<(), StoreError> {
        let current = self.load(group.as_str())?;
        let next = current.applied(requests)?;
        self.save(&next)
    }

    fn read_range(
        &self,
        group: &GroupHandle,
        subgroup_id: i32,
        range: &RangeSpec,
    ) -> Result<Option<Vec<Vec<String>>>, StoreError> {
        let workbook = self.load(group.as_str())?;
        let subgroup = workbook
            .subgroup(subgroup_id)
            .ok_or_else(|| StoreError::SubgroupNotFound {
                group: group.to_string(),
                id: subgroup_id,
            })?;
        Ok(subgroup.read(range))
    }
}
