//! Command-line cost estimates for AWS Global Accelerator.
//!
//! The `accel-pricing` binary reads a usage file, builds the accelerator's
//! cost components with [`accel_pricing_core`], optionally resolves their
//! prices against an exported price list, and prints the result as JSON.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod config;
pub mod error;
pub mod report;

use std::io::Write;
use std::path::Path;

use accel_pricing_core::{AcceleratorUsage, GlobalAccelerator, StaticPriceCatalog};

pub use cli::{Cli, Command, EstimateArgs};
pub use config::EstimatorConfig;
pub use error::CliError;
pub use report::{ComponentReport, EstimateReport};

/// Run a parsed command, writing its JSON output to `out`.
///
/// # Errors
///
/// Returns a [`CliError`] if an input file cannot be read or parsed, or if
/// the output cannot be written.
pub fn run(cli: &Cli, config: &EstimatorConfig, out: &mut dyn Write) -> Result<(), CliError> {
    match &cli.command {
        Command::Estimate(args) => estimate(args, config, out),
        Command::Template => template(out),
    }
}

fn estimate(
    args: &EstimateArgs,
    config: &EstimatorConfig,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let usage = match &args.usage {
        Some(path) => load_usage(path)?,
        None => AcceleratorUsage::default(),
    };

    let accelerator = GlobalAccelerator::new(&args.name)
        .with_enabled(!args.disabled)
        .with_ip_address_type(args.ip_address_type.into())
        .with_usage(usage);

    let resource = accelerator.price();
    tracing::info!(
        name = %resource.name,
        components = resource.len(),
        "Built cost components"
    );

    let catalog_path = args.catalog.as_ref().or(config.catalog_path.as_ref());
    let catalog = catalog_path.map(|path| load_catalog(path)).transpose()?;

    let report = EstimateReport::build(&resource, catalog.as_ref(), config);
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

fn template(out: &mut dyn Write) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, &AcceleratorUsage::template())?;
    writeln!(out)?;
    Ok(())
}

/// Read and parse a usage file.
///
/// # Errors
///
/// Returns [`CliError::Read`] if the file cannot be read and
/// [`CliError::InvalidUsage`] if it is not a valid usage document.
pub fn load_usage(path: &Path) -> Result<AcceleratorUsage, CliError> {
    let contents = read_file(path)?;
    let usage = serde_json::from_str(&contents).map_err(|source| CliError::InvalidUsage {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Loaded usage file");
    Ok(usage)
}

/// Read and parse a price-list file.
///
/// # Errors
///
/// Returns [`CliError::Read`] if the file cannot be read and
/// [`CliError::Pricing`] if it is not a valid price list.
pub fn load_catalog(path: &Path) -> Result<StaticPriceCatalog, CliError> {
    let contents = read_file(path)?;
    let catalog = StaticPriceCatalog::from_json(&contents)?;
    if catalog.is_empty() {
        tracing::warn!(path = %path.display(), "Price catalog has no entries");
    }
    tracing::info!(path = %path.display(), entries = catalog.len(), "Loaded price catalog");
    Ok(catalog)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
