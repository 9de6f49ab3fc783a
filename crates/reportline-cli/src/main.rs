//! reportline - Split, transform and publish flat financial reports
//!
//! Reads a comma-delimited report whose first cell names the section,
//! runs every section through its registered transform and pastes the
//! result into a year/month partitioned store.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "reportline")]
#[command(about = "Split, transform and publish flat financial reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "debug")]
    quiet: bool,

    /// Config file path (default: ./reportline.toml or ~/.config/reportline/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Transform a report and print the processed body
    Process(cmd::process::ProcessArgs),
    /// Transform a report and publish it to its monthly partition
    Publish(cmd::publish::PublishArgs),
    /// Inspect the destination store
    Store(cmd::store::StoreArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    reportline_core::init_logging(cli.quiet, cli.debug);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Process(args) => cmd::process::run(args, &config),
        Command::Publish(args) => cmd::publish::run(args, &config),
        Command::Store(args) => cmd::store::run(args, &config),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec![
                "Store directory",
                &config.store.dir.display().to_string(),
            ]);
            table.add_row(vec!["Root folder", &config.store.root_folder]);
            table.add_row(vec!["Placeholder title", &config.store.placeholder_title]);
            table.add_row(vec![
                "Parallel sections",
                if config.pipeline.parallel_sections {
                    "enabled"
                } else {
                    "disabled"
                },
            ]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
