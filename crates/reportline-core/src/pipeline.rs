//! Split → transform → join over a whole report

use rayon::prelude::*;

use crate::error::TransformError;
use crate::registry::DispatchRegistry;
use crate::report::Report;
use crate::section::{self, Section};

/// Runs every section of a report through its registered transform.
#[derive(Debug, Clone, Default)]
pub struct ReportPipeline {
    registry: DispatchRegistry,
    parallel: bool,
}

impl ReportPipeline {
    pub fn new(registry: DispatchRegistry) -> Self {
        Self {
            registry,
            parallel: false,
        }
    }

    /// Transform sections on the rayon pool. Output order is unchanged.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn registry(&self) -> &DispatchRegistry {
        &self.registry
    }

    /// Process `report` into a new report whose body holds the transformed
    /// sections, each block in first-occurrence order.
    ///
    /// Rows are re-prefixed with the raw section name, not the dispatch key.
    /// The first failing section aborts the whole report.
    pub fn process(&self, report: &Report) -> Result<Report, TransformError> {
        log::info!("Processing report '{}' ({})", report.name(), report.date());

        let sections = section::split(report.body());
        let blocks: Vec<String> = if self.parallel {
            let list: Vec<&Section> = sections.iter().collect();
            list.par_iter()
                .map(|s| self.process_section(s))
                .collect::<Vec<_>>()
                .into_iter()
                .collect::<Result<_, _>>()?
        } else {
            sections
                .iter()
                .map(|s| self.process_section(s))
                .collect::<Result<_, _>>()?
        };

        let body = blocks.concat();
        log::info!(
            "Finished processing report '{}': {} sections",
            report.name(),
            sections.len()
        );
        Ok(report.with_body(body))
    }

    fn process_section(&self, section: &Section) -> Result<String, TransformError> {
        log::info!("Processing section: '{}'", section.name);
        let transform = self.registry.resolve(&section.name);
        let rows = transform.apply(&section.rows).map_err(|source| TransformError {
            section: section.name.clone(),
            source,
        })?;
        Ok(section::join(&section.name, &rows))
    }
}
