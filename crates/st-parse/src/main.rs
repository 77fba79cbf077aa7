//! CLI entrypoint for the Structured Text parser.

mod cli;
mod commands;
mod config;
mod input;
mod render;
mod style;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::Config;

fn main() -> anyhow::Result<()> {
    if let Err(err) = run() {
        let message = format!("{err:#}");
        eprintln!("{}", style::error(format!("Error: {message}")));
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = std::env::current_dir().context("failed to resolve current directory")?;
    let mut config = Config::load(cli.config.as_deref(), &root)?;
    if let Some(path) = &config.config_path {
        debug!("using config {}", path.display());
    }

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    match cli.command {
        Command::Parse {
            inputs,
            format,
            trivia,
        } => {
            if let Some(format) = format {
                config.format = format;
            }
            config.trivia |= trivia;
            let inputs = input::collect_inputs(&inputs)?;
            let summary =
                commands::run_parse(&inputs, &config, &mut stdout.lock(), &mut stderr.lock())?;
            summary.into_result(config.deny_errors)
        }
        Command::Check { inputs } => {
            let inputs = input::collect_inputs(&inputs)?;
            let summary = commands::run_check(&inputs, &config, &mut stdout.lock())?;
            summary.into_result(config.deny_errors)
        }
        Command::Tokens { input: path } => {
            let input = input::single_input(&path)?;
            commands::run_tokens(&input, &mut stdout.lock())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}
