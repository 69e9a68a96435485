//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use accel_pricing_core::IpAddressType;

/// Cost estimates for AWS Global Accelerator.
#[derive(Parser, Debug)]
#[command(name = "accel-pricing")]
#[command(version, about = "Cost estimates for AWS Global Accelerator")]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse arguments from the process command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build an accelerator's cost components from a usage file
    Estimate(EstimateArgs),

    /// Print a usage file with every key set to zero
    Template,
}

/// Arguments for `estimate`.
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Accelerator name
    #[arg(long)]
    pub name: String,

    /// Usage file (JSON)
    #[arg(long, value_name = "FILE")]
    pub usage: Option<PathBuf>,

    /// Treat the accelerator as disabled
    #[arg(long)]
    pub disabled: bool,

    /// Price list to resolve unit prices against (JSON)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Listener IP address type
    #[arg(long, value_enum, default_value_t = IpAddressTypeArg::Ipv4)]
    pub ip_address_type: IpAddressTypeArg,
}

/// IP address type as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IpAddressTypeArg {
    /// IPv4 only
    Ipv4,
    /// IPv4 and IPv6
    DualStack,
}

impl From<IpAddressTypeArg> for IpAddressType {
    fn from(arg: IpAddressTypeArg) -> Self {
        match arg {
            IpAddressTypeArg::Ipv4 => Self::Ipv4,
            IpAddressTypeArg::DualStack => Self::DualStack,
        }
    }
}
