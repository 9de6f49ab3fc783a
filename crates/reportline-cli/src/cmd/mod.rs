pub mod process;
pub mod publish;
pub mod store;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use reportline_core::{DispatchRegistry, ReportPipeline};
use reportline_store::FsStore;

use crate::config::Config;

/// Read report text from `path`, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read report from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report file: {}", path.display()))
}

/// Display name for a report read from `path`.
pub fn report_name(path: &Path) -> String {
    if path == Path::new("-") {
        return "stdin".to_string();
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn build_pipeline(config: &Config) -> ReportPipeline {
    ReportPipeline::new(DispatchRegistry::with_report_pages())
        .parallel(config.pipeline.parallel_sections)
}

pub fn open_store(config: &Config, dir: Option<&Path>) -> Result<FsStore> {
    let dir = dir.unwrap_or(config.store.dir.as_path());
    FsStore::new(dir, &config.store.root_folder, &config.store.placeholder_title)
        .with_context(|| format!("Failed to open store at {}", dir.display()))
}
