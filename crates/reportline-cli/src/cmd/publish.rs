//! `reportline publish` - transform a report and write it to the store

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;

use reportline_core::{Report, ReportDate, ReportKind};
use reportline_publish::{PublishOutcome, Publisher};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Report file (comma-delimited, first cell names the section); `-` for stdin
    pub file: PathBuf,

    /// Report date as DD/MM/YYYY
    #[arg(long)]
    pub date: String,

    /// Report name shown in logs (default: file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Report kind: unknown, default or custom
    #[arg(long, default_value = "default")]
    pub kind: String,

    /// Store base directory (overrides config)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

pub fn run(args: PublishArgs, config: &Config) -> Result<()> {
    let date = ReportDate::parse(&args.date).context("Invalid --date")?;
    let kind = ReportKind::from_name(&args.kind).ok_or_else(|| {
        anyhow!(
            "Unknown report kind '{}' (expected unknown, default or custom)",
            args.kind
        )
    })?;
    let name = args.name.unwrap_or_else(|| super::report_name(&args.file));
    let body = super::read_input(&args.file)?;
    let report = Report::new(name, kind, date, body);

    let store = super::open_store(config, args.dir.as_deref())?;
    let publisher = Publisher::new(store, super::build_pipeline(config));

    match publisher
        .publish(&report)
        .with_context(|| format!("Failed to publish '{}'", report.name()))?
    {
        PublishOutcome::Written { partition, rows } => {
            println!(
                "written {}/{} ({rows} rows)",
                partition.group,
                date.month_year()
            );
        }
        PublishOutcome::SkippedStale { partition } => {
            println!(
                "skipped {}/{}: newer data already published",
                partition.group,
                date.month_year()
            );
        }
    }
    Ok(())
}
