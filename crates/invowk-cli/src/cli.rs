//! CLI argument definitions for invowk: a top-level `Parser` with global
//! flags and a `Commands` subcommand enum.

use crate::commands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "invowk")]
#[command(about = "invowk - a polyglot command runner")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity and include causal chains in error output.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to the invowk config file (defaults to the platform config dir).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve and execute a command through the runtime resolver.
    Run(commands::run::RunArgs),

    /// Dry-run the runtime resolution precedence chain.
    Resolve(commands::resolve::ResolveArgs),

    /// Check for or apply a self-update.
    Update(commands::update::UpdateArgs),

    /// Operate the TUI sidecar for manual testing.
    Tui(commands::tui::TuiArgs),

    /// Report environment readiness.
    Doctor(commands::doctor::DoctorArgs),

    /// Generate shell completions.
    Completions(commands::completions::CompletionsArgs),
}
