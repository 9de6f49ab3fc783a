//! Process a report and paste it into its monthly partition

use reportline_core::{CELL_SEPARATOR, Report, ReportPipeline, ROW_SEPARATOR};
use reportline_store::{CellRef, DestinationStore};

use crate::error::{PublishError, StoreOp};
use crate::partition::{Partition, resolve_partition};
use crate::staleness::{METADATA_LABEL, is_fresh_enough};

/// Result of a publish that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The subgroup was overwritten with `rows` rows, metadata row included.
    Written { partition: Partition, rows: usize },
    /// The subgroup already holds data dated after this report.
    SkippedStale { partition: Partition },
}

impl PublishOutcome {
    pub fn written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }

    pub fn partition(&self) -> &Partition {
        match self {
            Self::Written { partition, .. } | Self::SkippedStale { partition } => partition,
        }
    }
}

/// Text pasted into a subgroup: the metadata row, then the body.
pub fn upload_text(report: &Report) -> String {
    format!(
        "{METADATA_LABEL}{CELL_SEPARATOR}{}{ROW_SEPARATOR}{}",
        report.date(),
        report.body()
    )
}

pub struct Publisher<S> {
    store: S,
    pipeline: ReportPipeline,
}

impl<S: DestinationStore> Publisher<S> {
    pub fn new(store: S, pipeline: ReportPipeline) -> Self {
        Self { store, pipeline }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pipeline(&self) -> &ReportPipeline {
        &self.pipeline
    }

    /// Transform `report`, then write it unless its partition already
    /// holds newer data.
    ///
    /// Processing runs before any store call, so a failing transform
    /// leaves the store untouched. The write is one paste starting at A1
    /// that overwrites every covered cell.
    pub fn publish(&self, report: &Report) -> Result<PublishOutcome, PublishError> {
        let processed = self.pipeline.process(report)?;
        let partition = resolve_partition(&self.store, report.date())?;

        if !is_fresh_enough(
            &self.store,
            report.date(),
            &partition.group,
            partition.subgroup_id,
        )? {
            log::warn!(
                "Skipping '{}' ({}): {}/{} holds newer data",
                report.name(),
                report.date(),
                partition.group,
                report.date().month_year()
            );
            return Ok(PublishOutcome::SkippedStale { partition });
        }

        let text = upload_text(&processed);
        let rows = text.lines().count();
        self.store
            .write_range(
                &partition.group,
                partition.subgroup_id,
                CellRef::TOP_LEFT,
                &text,
                CELL_SEPARATOR,
            )
            .map_err(PublishError::store(StoreOp::WriteRange))?;
        log::info!(
            "Uploaded '{}' to {}/{} ({rows} rows)",
            report.name(),
            partition.group,
            report.date().month_year()
        );

        Ok(PublishOutcome::Written { partition, rows })
    }
}
