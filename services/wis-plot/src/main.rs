//! WIS station chart tool.
//!
//! Retrieves ocean wave hindcast data for one station and date range from
//! the USACE Wave Information Study archive and writes a three-panel chart
//! of significant wave height, peak period and mean direction.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use wis_plot::{source_for, ConfigOverrides, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "wis-plot")]
#[command(about = "Plot WIS hindcast wave parameters for one station")]
struct Args {
    /// Run configuration file (YAML); defaults to config/wis-plot.yaml when present
    #[arg(short, long, env = "WIS_CONFIG")]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json);

    // Before any HDF5/NetCDF call
    wis_netcdf::silence_hdf5_errors();

    let config = RunConfig::resolve(args.config.as_deref())?;
    let config = args.overrides.apply(config);

    // One run, one locator at a time
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(async move {
        let source = source_for(config.access, &config.fetch_config())?;
        let summary = wis_plot::run(&config, source.as_ref()).await?;

        info!(
            path = %summary.output.display(),
            files = summary.files,
            loaded = summary.loaded_samples,
            plotted = summary.plotted_samples,
            "Done"
        );
        Ok::<(), anyhow::Error>(())
    })
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = fmt().with_env_filter(filter).with_target(true).with_level(true);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
