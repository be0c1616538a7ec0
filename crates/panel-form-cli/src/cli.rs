use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use crate::cmd::{self, check::CheckArgs, host::HostArgs, schema::SchemaArgs};

#[derive(Parser, Debug)]
#[command(
    name = "panel-form",
    about = "Inspect and check agent configuration panel forms",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Log more; repeat for debug output
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the form schema or its JSON Schema
    Schema(SchemaArgs),
    /// Load the panel, apply changes as user events and report field states
    Check(CheckArgs),
    /// Check a value against the host field rules
    Host(HostArgs),
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Schema(args) => cmd::schema::run(&args),
        Commands::Check(args) => cmd::check::run(&args),
        Commands::Host(args) => cmd::host::run(&args),
    }
}

fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level_for(verbose))
        .with_target(false)
        .init();
}
