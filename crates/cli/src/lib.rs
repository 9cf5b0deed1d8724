use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "optionbook")]
#[command(about = "Optionbook - on-chain option catalog, positions, and order quoting")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the read pipeline against the in-memory demo chain and print a
    /// snapshot of pairs, options, and positions
    Snapshot {
        /// Path to the configuration file
        #[arg(short, long, default_value = "optionbook.yaml")]
        config: PathBuf,

        /// Account whose positions are aggregated
        #[arg(short, long, default_value = "0x00000000000000000000000000000000000000aa")]
        account: Address,

        /// Emit the snapshot as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Validate a configuration file without running anything
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = "optionbook.yaml")]
        config: PathBuf,
    },

    /// Initialize a new configuration file with defaults
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = "optionbook.yaml")]
        output: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
