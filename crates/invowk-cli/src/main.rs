//! invowk binary entry point: parse args, install a `tracing` subscriber
//! gated by `--verbose`, dispatch to a command module, and on failure print
//! an actionable message and exit non-zero.

mod cli;
mod commands;
mod config;
mod config_dir;
mod demo;
mod errors_ext;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use config::{ConfigSource, FileConfigSource};
use invowk_errors::ActionableError;
use std::process::ExitCode;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_tracing(verbose);

    if let Err(err) = run(cli, verbose) {
        if let Some(actionable) = err.downcast_ref::<ActionableError>() {
            eprintln!("{}", actionable.format(verbose));
        } else if verbose {
            eprintln!("error: {err:#}");
        } else {
            eprintln!("error: {err}");
        }
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(cli: Cli, verbose: bool) -> anyhow::Result<()> {
    let config_path = cli
        .config
        .clone()
        .or_else(|| config_dir::host_config_dir().map(|dir| dir.join("config.toml")));

    let config = match &config_path {
        Some(path) => FileConfigSource { path: path.clone() }.load()?,
        None => invowk_model::Config::default(),
    };

    match cli.command {
        Commands::Run(args) => commands::run::run(args, &config, verbose),
        Commands::Resolve(args) => commands::resolve::run(args, &config),
        Commands::Update(args) => commands::update::run(args),
        Commands::Tui(args) => commands::tui::run(args),
        Commands::Doctor(args) => commands::doctor::run(args, config_path.as_ref()),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
