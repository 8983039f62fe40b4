use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values with a header row (default)
    #[default]
    Csv,
    /// Pretty-printed JSON array of row objects
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "urbesense")]
#[command(about = "Environmental activity index and impact scoring for urban zones", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by the commands that emit a table.
#[derive(Args, Debug, Clone)]
pub struct TableOutput {
    /// Configuration file (defaults to the nearest .urbesense.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Append a high/medium/low band column
    #[arg(long)]
    pub bands: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score every zone in a CSV file
    Score {
        /// Input CSV with co2, noise, temperature and safety columns
        input: PathBuf,

        #[command(flatten)]
        output: TableOutput,
    },

    /// Apply uniform deltas to every zone and re-score
    Simulate {
        /// Input CSV with co2, noise, temperature and safety columns
        input: PathBuf,

        /// CO2 delta in ppm
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        co2: f64,

        /// Temperature delta in °C
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        temperature: f64,

        /// Noise delta in dB
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        noise: f64,

        /// Safety delta in 0-100 points
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        safety: f64,

        /// Do not clamp shifted values into the safe simulation bounds
        #[arg(long = "no-clamp")]
        no_clamp: bool,

        #[command(flatten)]
        output: TableOutput,
    },

    /// Report out-of-range readings and the score spread as JSON
    Audit {
        /// Input CSV with co2, noise, temperature and safety columns
        input: PathBuf,

        /// Configuration file (defaults to the nearest .urbesense.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a default .urbesense.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}
