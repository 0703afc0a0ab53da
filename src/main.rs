//! # shoplens - Main Entry Point
//!
//! Supports two operational modes:
//! - **Dashboard** (default): interactive terminal UI over the built report
//! - **Headless** (`--headless`): print the report as plain text
//!
//! Either mode can also write the summary JSON and dataset CSV exports.

use anyhow::{Context, Result};
use clap::Parser;
use shoplens::cli::Args;
use shoplens::domain::LoadError;
use shoplens::{dataset, export, report, tui};
use std::fs::File;
use std::io::BufWriter;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_NOINPUT: i32 = 66;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_code_for(&e)
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<LoadError>() {
        Some(LoadError::FileNotFound(_)) => EXIT_NOINPUT,
        _ => EXIT_ERROR,
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    // A load failure is the only run-fatal error: one message, no partial
    // dashboard
    let dataset = dataset::load_cached(&args.file)
        .with_context(|| format!("failed to load survey data from {}", args.file.display()))?;

    let report = report::build_report(&dataset, &args.delimiter);

    if args.headless {
        if !args.quiet {
            println!("shoplens v{}", env!("CARGO_PKG_VERSION"));
            println!("survey: {}", args.file.display());
        }
        print!("{}", report::text::render_text(&report));
    } else {
        tui::run(&report, &dataset)?;
    }

    if let Some(ref export_path) = args.export {
        let file = File::create(export_path).context("Failed to create summary output file")?;
        let writer = BufWriter::new(file);
        export::write_summary_json(&report, writer).context("Failed to export summary")?;
        if !args.quiet {
            println!("saved: {}", export_path.display());
        }
    }

    if let Some(ref export_path) = args.export_csv {
        let file = File::create(export_path).context("Failed to create CSV output file")?;
        let writer = BufWriter::new(file);
        export::write_dataset_csv(&dataset, writer).context("Failed to export dataset")?;
        if !args.quiet {
            println!("saved: {}", export_path.display());
        }
    }

    Ok(())
}
