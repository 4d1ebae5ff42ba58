mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scrubber", about = "Scroll-driven image sequence scrubber")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover how many frames of a sequence exist
    Probe(commands::probe::ProbeArgs),
    /// Render the placeholder image for a frame
    Placeholder(commands::placeholder::PlaceholderArgs),
    /// Replay an input script against the scroll-lock controller
    Replay(commands::replay::ReplayArgs),
    /// Print or save the default configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Probe(args) => commands::probe::run(args),
        Commands::Placeholder(args) => commands::placeholder::run(args),
        Commands::Replay(args) => commands::replay::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
