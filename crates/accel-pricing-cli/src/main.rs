//! Accel-Pricing - cost estimates for AWS Global Accelerator.

use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use accel_pricing::{Cli, EstimatorConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,accel_pricing=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse_args();
    let config = EstimatorConfig::from_env();

    tracing::debug!(
        currency = %config.currency,
        hours_per_month = %config.hours_per_month,
        catalog_configured = %config.catalog_path.is_some(),
        "Configuration loaded"
    );

    let stdout = io::stdout();
    accel_pricing::run(&cli, &config, &mut stdout.lock())?;

    Ok(())
}
