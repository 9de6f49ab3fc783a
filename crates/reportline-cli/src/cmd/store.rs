//! `reportline store` - inspect the published workbooks

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use reportline_publish::METADATA_RANGE;
use reportline_store::{FsStore, RangeSpec, VerifyResult};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct StoreArgs {
    #[command(subcommand)]
    pub action: StoreAction,

    /// Store base directory (overrides config)
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum StoreAction {
    /// List every group and its monthly subgroups
    List,
    /// Verify subgroup content hashes
    Verify {
        /// Specific group to verify (default: all)
        group: Option<String>,
    },
    /// Remove `.json.tmp` files left by interrupted writes
    Cleanup,
}

pub fn run(args: StoreArgs, config: &Config) -> Result<()> {
    let store = super::open_store(config, args.dir.as_deref())?;
    match args.action {
        StoreAction::List => list(&store),
        StoreAction::Verify { group } => verify(&store, group.as_deref()),
        StoreAction::Cleanup => cleanup(&store).map(|_| ()),
    }
}

fn short(hash: &str) -> &str {
    &hash[..std::cmp::min(8, hash.len())]
}

fn header(names: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(names.iter().map(|n| Cell::new(n).fg(Color::Cyan)));
    table
}

fn list(store: &FsStore) -> Result<()> {
    let groups = store.list_groups()?;
    if groups.is_empty() {
        eprintln!("No groups in {}.", store.root().display());
        return Ok(());
    }

    let metadata = RangeSpec::parse(METADATA_RANGE)?;
    let mut table = header(&["Group", "Id", "Title", "Report date", "Content", "Updated"]);
    let mut count = 0;

    for name in &groups {
        let workbook = store.load(name)?;
        for subgroup in &workbook.subgroups {
            let recorded = subgroup
                .read(&metadata)
                .and_then(|rows| rows.into_iter().next())
                .and_then(|row| row.into_iter().nth(1));
            let date_cell = match recorded {
                Some(date) => Cell::new(date),
                None => Cell::new("-").fg(Color::DarkGrey),
            };
            table.add_row(vec![
                Cell::new(&workbook.name),
                Cell::new(subgroup.id),
                Cell::new(&subgroup.title),
                date_cell,
                Cell::new(short(&subgroup.content_hash)),
                Cell::new(workbook.updated_at.format("%Y-%m-%d %H:%M:%S")),
            ]);
            count += 1;
        }
    }

    eprintln!("\n{table}");
    eprintln!("{} subgroups in {} groups", count, groups.len());
    Ok(())
}

fn verify(store: &FsStore, group: Option<&str>) -> Result<()> {
    if let Some(g) = group {
        let results = store.verify(g)?;
        if !print_verify_results(g, &results) {
            anyhow::bail!("integrity check failed for group {g}");
        }
        return Ok(());
    }

    let groups = store.list_groups()?;
    if groups.is_empty() {
        eprintln!("No groups to verify.");
        return Ok(());
    }

    let mut table = header(&["Group", "Subgroups", "Status"]);
    let mut all = Vec::with_capacity(groups.len());
    for g in &groups {
        let results = store.verify(g)?;
        let status_cell = if results.iter().all(|r| r.ok) {
            Cell::new("OK").fg(Color::Green)
        } else {
            Cell::new("FAIL").fg(Color::Red)
        };
        table.add_row(vec![Cell::new(g), Cell::new(results.len()), status_cell]);
        all.push((g, results));
    }

    eprintln!("\n{table}");

    for (g, results) in &all {
        print_mismatches(g, results);
    }

    if all.iter().all(|(_, results)| results.iter().all(|r| r.ok)) {
        eprintln!("All groups verified OK.");
        Ok(())
    } else {
        anyhow::bail!("some groups have integrity issues")
    }
}

fn cleanup(store: &FsStore) -> Result<usize> {
    let removed = store.cleanup_tmp()?;
    if removed == 0 {
        eprintln!("Nothing to clean up.");
    } else {
        eprintln!("Removed {removed} stale tmp files.");
    }
    Ok(removed)
}

fn print_verify_results(group: &str, results: &[VerifyResult]) -> bool {
    let all_ok = results.iter().all(|r| r.ok);
    let status = if all_ok { "OK" } else { "FAIL" };
    eprintln!("[{status}] {group} ({} subgroups)", results.len());

    print_mismatches(group, results);

    all_ok
}

fn print_mismatches(group: &str, results: &[VerifyResult]) {
    for r in results {
        if !r.ok {
            eprintln!("  MISMATCH in {group}: subgroup {} '{}'", r.subgroup_id, r.title);
            eprintln!("    expected: {}", short(&r.expected));
            eprintln!("    actual:   {}", short(&r.actual));
        }
    }
}
