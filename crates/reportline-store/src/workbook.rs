//! Workbook model shared by the store implementations
//!
//! A workbook is one yearly group: named, timestamped, holding subgroups
//! in creation order. Each subgroup owns a ragged grid of text cells.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::capability::{StoreRequest, SubgroupInfo};
use crate::error::StoreError;
use crate::hash;
use crate::range::{CellRef, RangeSpec};

/// Id of the placeholder subgroup in a new workbook, outside the 0..=11 month ids.
pub const PLACEHOLDER_SUBGROUP_ID: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subgroup {
    pub id: i32,
    pub title: String,
    pub cells: Vec<Vec<String>>,
    /// Full blake3 hex hash of `cells`, refreshed on every paste.
    pub content_hash: String,
}

impl Subgroup {
    pub fn new(id: i32, title: impl Into<String>) -> Self {
        let mut subgroup = Self {
            id,
            title: title.into(),
            cells: Vec::new(),
            content_hash: String::new(),
        };
        subgroup.rehash();
        subgroup
    }

    pub fn info(&self) -> SubgroupInfo {
        SubgroupInfo {
            id: self.id,
            title: self.title.clone(),
        }
    }

    fn rehash(&mut self) -> blake3::Hash {
        let digest = hash::hash_grid(&self.cells);
        self.content_hash = digest.to_hex().to_string();
        digest
    }

    /// Overwrite the cells covered by `text`, growing the grid as needed.
    /// Cells outside the pasted rectangle keep their values.
    pub fn paste_values(&mut self, top_left: CellRef, text: &str, delimiter: char) {
        let text = text.strip_suffix('\n').unwrap_or(text);
        if !text.is_empty() {
            for (r, line) in text.split('\n').enumerate() {
                let row_idx = top_left.row + r;
                if self.cells.len() <= row_idx {
                    self.cells.resize_with(row_idx + 1, Vec::new);
                }
                let row = &mut self.cells[row_idx];
                for (c, value) in line.split(delimiter).enumerate() {
                    let col_idx = top_left.col + c;
                    if row.len() <= col_idx {
                        row.resize(col_idx + 1, String::new());
                    }
                    row[col_idx] = value.to_string();
                }
            }
        }
        let digest = self.rehash();
        log::debug!(
            "subgroup {}: pasted at {top_left}, {} rows now ({})",
            self.id,
            self.cells.len(),
            hash::short_hash(&digest)
        );
    }

    /// Values inside `range`, trimmed like a spreadsheet values API:
    /// trailing empty cells per row and trailing empty rows are dropped,
    /// and an all-empty range reads as `None`.
    pub fn read(&self, range: &RangeSpec) -> Option<Vec<Vec<String>>> {
        let mut rows: Vec<Vec<String>> = range
            .rows()
            .map(|r| {
                let row = self.cells.get(r);
                let mut values: Vec<String> = range
                    .cols()
                    .map(|c| {
                        row.and_then(|row| row.get(c))
                            .cloned()
                            .unwrap_or_default()
                    })
                    .collect();
                while values.last().is_some_and(|v| v.is_empty()) {
                    values.pop();
                }
                values
            })
            .collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        if rows.is_empty() { None } else { Some(rows) }
    }

    /// Recompute the grid hash and compare with the stored one.
    pub fn verify(&self) -> (String, bool) {
        let actual = hash::hash_grid(&self.cells).to_hex().to_string();
        let ok = actual == self.content_hash;
        (actual, ok)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workbook {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub subgroups: Vec<Subgroup>,
}

impl Workbook {
    /// New workbook holding only the placeholder subgroup.
    pub fn new(name: &str, placeholder_title: &str) -> Self {
        let now = Utc::now();
        Self {
            name: name.to_string(),
            created_at: now,
            updated_at: now,
            subgroups: vec![Subgroup::new(PLACEHOLDER_SUBGROUP_ID, placeholder_title)],
        }
    }

    pub fn subgroup(&self, id: i32) -> Option<&Subgroup> {
        self.subgroups.iter().find(|s| s.id == id)
    }

    fn subgroup_mut(&mut self, id: i32) -> Result<&mut Subgroup, StoreError> {
        let group = self.name.clone();
        self.subgroups
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::SubgroupNotFound { group, id })
    }

    pub fn infos(&self) -> Vec<SubgroupInfo> {
        self.subgroups.iter().map(Subgroup::info).collect()
    }

    /// Apply `requests` in order to a copy of this workbook and return it.
    /// `self` is left untouched, so a failing request discards the batch.
    pub fn applied(&self, requests: &[StoreRequest]) -> Result<Workbook, StoreError> {
        let mut next = self.clone();
        for request in requests {
            next.apply_one(request)?;
        }
        next.updated_at = Utc::now();
        Ok(next)
    }

    fn apply_one(&mut self, request: &StoreRequest) -> Result<(), StoreError> {
        match request {
            StoreRequest::CreateSubgroup { id, title } => {
                if self.subgroup(*id).is_some() {
                    return Err(StoreError::SubgroupExists {
                        group: self.name.clone(),
                        id: *id,
                    });
                }
                log::debug!("{}: adding subgroup {id} '{title}'", self.name);
                self.subgroups.push(Subgroup::new(*id, title.clone()));
            }
            StoreRequest::DeleteSubgroup { id } => {
                let pos = self
                    .subgroups
                    .iter()
                    .position(|s| s.id == *id)
                    .ok_or(StoreError::SubgroupNotFound {
                        group: self.name.clone(),
                        id: *id,
                    })?;
                log::debug!("{}: deleting subgroup {id}", self.name);
                self.subgroups.remove(pos);
            }
            StoreRequest::PasteValues {
                subgroup_id,
                top_left,
                text,
                delimiter,
            } => {
                self.subgroup_mut(*subgroup_id)?
                    .paste_values(*top_left, text, *delimiter);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a1b1() -> RangeSpec {
        RangeSpec::parse("A1:B1").unwrap()
    }

    #[test]
    fn new_workbook_has_placeholder() {
        let wb = Workbook::new("2025", "Sheet1");
        assert_eq!(wb.infos(), vec![SubgroupInfo {
            id: PLACEHOLDER_SUBGROUP_ID,
            title: "Sheet1".into()
        }]);
    }

    #[test]
    fn paste_then_read() {
        let mut s = Subgroup::new(2, "03/2024");
        s.paste_values(CellRef::TOP_LEFT, "Report date,15/03/2024\nFees,1,2\n", ',');
        assert_eq!(
            s.read(&a1b1()),
            Some(vec![vec!["Report date".to_string(), "15/03/2024".to_string()]])
        );
        assert_eq!(s.cells[1], vec!["Fees", "1", "2"]);
    }

    #[test]
    fn paste_overwrites_only_covered_cells() {
        let mut s = Subgroup::new(0, "01/2025");
        s.paste_values(CellRef::TOP_LEFT, "a,b,c\nd,e,f\ng\n", ',');
        s.paste_values(CellRef::TOP_LEFT, "x,y\nz\n", ',');
        assert_eq!(s.cells[0], vec!["x", "y", "c"]);
        assert_eq!(s.cells[1], vec!["z", "e", "f"]);
        assert_eq!(s.cells[2], vec!["g"]);
    }

    #[test]
    fn paste_at_offset() {
        let mut s = Subgroup::new(0, "t");
        s.paste_values(CellRef::new(1, 2), "v", ',');
        assert_eq!(s.cells[0], Vec::<String>::new());
        assert_eq!(s.cells[1], vec!["", "", "v"]);
    }

    #[test]
    fn paste_updates_hash() {
        let mut s = Subgroup::new(0, "t");
        let before = s.content_hash.clone();
        s.paste_values(CellRef::TOP_LEFT, "a", ',');
        assert_ne!(s.content_hash, before);
        assert!(s.verify().1);
    }

    #[test]
    fn read_empty_range_is_none() {
        let s = Subgroup::new(0, "t");
        assert_eq!(s.read(&a1b1()), None);
    }

    #[test]
    fn read_trims_trailing_empty_cells() {
        let mut s = Subgroup::new(0, "t");
        s.paste_values(CellRef::TOP_LEFT, "label,", ',');
        assert_eq!(s.read(&a1b1()), Some(vec![vec!["label".to_string()]]));
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let wb = Workbook::new("2025", "Sheet1");
        let requests = vec![
            StoreRequest::CreateSubgroup {
                id: 0,
                title: "01/2025".into(),
            },
            StoreRequest::DeleteSubgroup { id: 7 },
        ];
        let err = wb.applied(&requests).unwrap_err();
        assert!(matches!(err, StoreError::SubgroupNotFound { id: 7, .. }));
        assert_eq!(wb.subgroups.len(), 1);
        assert!(wb.subgroup(0).is_none());
    }

    #[test]
    fn create_and_delete_placeholder_together() {
        let wb = Workbook::new("2025", "Sheet1");
        let next = wb
            .applied(&[
                StoreRequest::CreateSubgroup {
                    id: 0,
                    title: "01/2025".into(),
                },
                StoreRequest::DeleteSubgroup {
                    id: PLACEHOLDER_SUBGROUP_ID,
                },
            ])
            .unwrap();
        assert_eq!(next.infos(), vec![SubgroupInfo {
            id: 0,
            title: "01/2025".into()
        }]);
    }

    #[test]
    fn duplicate_subgroup_rejected() {
        let wb = Workbook::new("2025", "Sheet1");
        let err = wb
            .applied(&[StoreRequest::CreateSubgroup {
                id: PLACEHOLDER_SUBGROUP_ID,
                title: "x".into(),
            }])
            .unwrap_err();
        assert!(matches!(err, StoreError::SubgroupExists { .. }));
    }

    #[test]
    fn verify_detects_tampering() {
        let mut s = Subgroup::new(0, "t");
        s.paste_values(CellRef::TOP_LEFT, "a,b", ',');
        s.cells[0][1] = "tampered".into();
        assert!(!s.verify().1);
    }
}
