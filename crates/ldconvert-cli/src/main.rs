//! Code for the `ldconvert` executable.

use std::io::stdout;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ldconvert_core::batch::convert_folder;
use ldconvert_core::config::ConvertConfig;
use tracing::subscriber::set_global_default;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

#[derive(Parser)]
#[command(name = "ldconvert", version, about = "Convert MoTeC .ld files to resampled CSV format.")]
struct Cli {
    /// Path to the input folder
    #[arg(long)]
    input_folder: PathBuf,

    /// Path to the output folder
    #[arg(long)]
    output_folder: PathBuf,
}

/// Route log output to stdout; `RUST_LOG` overrides the default `info` level.
fn start_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let subscriber = Registry::default().with(
        fmt::layer()
            .without_time()
            .with_target(false)
            .with_writer(stdout)
            .with_filter(filter),
    );

    set_global_default(subscriber).context("unable to set global subscriber")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    start_logging()?;

    let report = convert_folder(&cli.input_folder, &cli.output_folder, &ConvertConfig::default())
        .with_context(|| {
            format!(
                "Failed converting logs from {} to {}",
                cli.input_folder.display(),
                cli.output_folder.display()
            )
        })?;

    tracing::info!("Converted {} file(s)", report.len());
    Ok(())
}
