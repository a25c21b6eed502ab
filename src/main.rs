//! xnc-import - CLI tool to inspect imported project exports.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use xnc_import::import_project_file;

/// Import a panel-cutting project export and report its part catalog.
#[derive(Parser, Debug)]
#[command(name = "xnc-import")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input .project file path
    #[arg(short, long)]
    input: PathBuf,

    /// Output the decoded catalog as JSON
    #[arg(long)]
    debug: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Processing: {}", args.input.display());

    let report = import_project_file(&args.input)
        .with_context(|| format!("Failed to import {}", args.input.display()))?;

    for warning in &report.warnings {
        warn!("{}", warning);
    }

    // Debug output
    if args.debug {
        let json = serde_json::to_string_pretty(&report)?;
        println!("{}", json);
        return Ok(());
    }

    info!(
        "Imported {} part(s), {} goods, {} warning(s)",
        report.parts.len(),
        report.goods.len(),
        report.warnings.len()
    );

    for part in report.parts.iter() {
        let mut features = Vec::new();
        if part.is_drill {
            features.push(format!("{} holes", part.drills.total_count()));
        }
        if part.is_cnc {
            features.push(format!("{} path actions", part.actions.len()));
        }
        if part.is_notch {
            features.push(format!("{} notches", part.notches.len()));
        }
        if part.is_glue {
            features.push("glue-up".to_string());
        }
        info!(
            "part {}: {}x{} x{} gid={} {}",
            part.pos,
            part.length,
            part.width,
            part.count,
            part.gid,
            features.join(", ")
        );
    }

    Ok(())
}
