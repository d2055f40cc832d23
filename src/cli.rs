//! CLI definitions for lazywire.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use lazywire_core::OrderingPolicy;

/// lazywire CLI.
#[derive(Parser)]
#[command(name = "lazywire")]
#[command(about = "Lazy service registry toolkit")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.lazywire/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Load and validate the configuration file
    Check,

    /// Wire a sample service graph and walk it lazily (default)
    Demo {
        /// Override the configured ordering policy
        #[arg(long, value_enum)]
        ordering: Option<OrderingArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum OrderingArg {
    /// Pending entries first, resolved entries after
    PendingFirst,
    /// Registration order
    Registration,
}

impl From<OrderingArg> for OrderingPolicy {
    fn from(arg: OrderingArg) -> Self {
        match arg {
            OrderingArg::PendingFirst => OrderingPolicy::PendingFirst,
            OrderingArg::Registration => OrderingPolicy::Registration,
        }
    }
}
