use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use urbesense::cli::{Cli, Commands};
use urbesense::commands;
use urbesense::simulator::Delta;

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match cli.command {
        Commands::Score { input, output } => commands::score_file(&input, &output),
        Commands::Simulate {
            input,
            co2,
            temperature,
            noise,
            safety,
            no_clamp,
            output,
        } => commands::simulate_file(
            &input,
            Delta::new(co2, temperature, noise, safety),
            !no_clamp,
            &output,
        ),
        Commands::Audit { input, config } => commands::audit_file(&input, config.as_deref()),
        Commands::Init { force } => commands::init_config(force),
    }
}
