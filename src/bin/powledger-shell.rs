#![forbid(unsafe_code)]
//! Interactive shell over an in-memory proof-of-work ledger.

use clap::Parser;
use colored::*;
use powledger::blockchain::Blockchain;
use powledger::cli::Shell;
use powledger::config::{load_config, parse_level};
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "powledger-shell", version, about = "Interactive proof-of-work ledger")]
struct Args {
    /// Configuration file (defaults to ./powledger.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level written to stderr, overriding the configuration
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let level = match &args.log_level {
        Some(level) => parse_level(level)?,
        None => config.logging.max_level()?,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    println!("{}", "powledger".bright_cyan().bold());
    println!("{}", "---------".bright_cyan());

    let mut chain = Blockchain::new();
    info!(genesis = %chain.latest_block().hash(), "ledger initialised");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut chain, stdin.lock(), stdout.lock(), config.display).run()?;

    info!(blocks = chain.len(), "shell exited");
    Ok(())
}
