//! `reportline process` - transform a report and print the result

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;

use reportline_core::{Report, ReportDate, ReportKind};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Report file (comma-delimited, first cell names the section); `-` for stdin
    pub file: PathBuf,

    /// Report name shown in logs (default: file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Report date as DD/MM/YYYY (default: today)
    #[arg(long)]
    pub date: Option<String>,
}

pub fn run(args: ProcessArgs, config: &Config) -> Result<()> {
    let date = match &args.date {
        Some(d) => ReportDate::parse(d).context("Invalid --date")?,
        None => {
            let today = chrono::Local::now().date_naive();
            ReportDate::from_ymd(today.year(), today.month(), today.day())
                .context("Current date is out of range")?
        }
    };
    let name = args.name.unwrap_or_else(|| super::report_name(&args.file));
    let body = super::read_input(&args.file)?;

    let report = Report::new(name, ReportKind::Unknown, date, body);
    let processed = super::build_pipeline(config).process(&report)?;

    print!("{}", processed.body());
    Ok(())
}
