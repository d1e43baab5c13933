mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("podium_cli=info,podium_core=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match args.command {
        Command::Init { capacity } => commands::init::run(&args.table, capacity),
        Command::Show => commands::show::run(&args.table),
        Command::Submit {
            score,
            name,
            lowest_first,
        } => commands::submit::run(&args.table, score, name.as_deref(), lowest_first),
        Command::Export { format, output } => {
            commands::export::run(&args.table, format, output.as_deref())
        }
    }
}
