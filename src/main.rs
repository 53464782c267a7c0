mod app;
mod cli;
mod collect;
mod config;
mod consts;
mod core;
mod error;
mod folders;
mod lock;
mod orchestrator;
mod output;
mod store;
mod summarize;
mod utils;
mod writer;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use app::{CommandContext, handle_config, handle_generate, handle_updated, handle_window};
use cli::{Cli, Commands, GenerateArgs};
use error::AppError;

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(cli: &Cli) -> Result<(), AppError> {
    let mut ctx = CommandContext::new(cli)?;
    match &cli.command {
        None => handle_generate(&GenerateArgs::default(), &ctx),
        Some(Commands::Generate(args)) => handle_generate(args, &ctx),
        Some(Commands::Window) => handle_window(&ctx),
        Some(Commands::Updated) => handle_updated(&ctx),
        Some(Commands::Config { command }) => handle_config(command, &mut ctx),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = dispatch(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
