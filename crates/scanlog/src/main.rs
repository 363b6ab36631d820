//! scanlog CLI - Main entry point

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

#[derive(Parser)]
#[command(name = "scanlog")]
#[command(version)]
#[command(about = "View clang static analyzer plist reports", long_about = None)]
struct Cli {
    /// Plist report files produced by the clang static analyzer
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Emit the parsed reports as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = match cli.verbose {
        0 => "scanlog=info",
        1 => "scanlog=debug,scanlog_plist=debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0usize;

    for path in &cli.files {
        match scanlog_plist::read_log_file(path) {
            Ok(log) => {
                tracing::debug!(
                    path = %path.display(),
                    diagnostics = log.diagnostics.len(),
                    "parsed report"
                );
                if cli.json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&log)?)?;
                } else {
                    render::text(&mut out, path, &log)?;
                }
            }
            Err(err) => {
                // One message per file; the remaining files are still read.
                eprintln!("error: could not read \"{}\": {}", path.display(), err);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} report file(s) could not be read");
    }
    Ok(())
}
