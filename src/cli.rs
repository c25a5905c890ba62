use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Wavebank separable wavelet decomposition.
#[derive(Parser)]
#[command(
    name = "wavebank",
    version,
    about = "Separable wavelet pyramid and packet decomposition of N-dimensional images"
)]
pub struct Cli {
    /// Increase verbosity (-v run summary, -vv per-band detail, -vvvv per-slab trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Decompose a synthetic image and report per-band statistics.
    Decompose(RunArgs),
    /// Decompose and rebuild a synthetic image, checking the error.
    Roundtrip(RoundtripArgs),
    /// Lay a decimated pyramid out as one synopsis image.
    Synopsis(RunArgs),
}

/// Arguments shared by every subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "wavebank.toml")]
    pub config: PathBuf,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the input seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `roundtrip` subcommand.
#[derive(clap::Args)]
pub struct RoundtripArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Largest accepted error relative to the peak input magnitude.
    #[arg(short, long, default_value_t = 1e-9)]
    pub tolerance: f64,
}
