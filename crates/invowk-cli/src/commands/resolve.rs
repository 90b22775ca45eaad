//! `invowk resolve` — dry-run the runtime resolution precedence chain
//! against one of the built-in demo commands, without building an
//! execution context or running anything.

use crate::demo;
use crate::errors_ext::ActionableResultExt;
use crate::output::Output;
use clap::Args;
use invowk_model::{Config, Platform};
use invowk_resolver::resolve;

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Name of a built-in demo command (see `invowk doctor` or `--help`).
    pub name: String,

    /// Force a specific runtime (native, virtual, container).
    #[arg(long)]
    pub runtime: Option<String>,

    /// Force a specific platform tag (linux, mac, windows); defaults to the host.
    #[arg(long)]
    pub platform: Option<String>,
}

pub fn run(args: ResolveArgs, config: &Config) -> anyhow::Result<()> {
    let command = demo::lookup(&args.name).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown demo command '{}'; known commands: {}",
            args.name,
            demo::names().join(", ")
        )
    })?;

    let platform = match &args.platform {
        Some(raw) => raw
            .parse::<Platform>()
            .map_err(|err| anyhow::anyhow!("invalid platform tag '{raw}': {err}"))?,
        None => Platform::current(),
    };

    let selection = resolve(&command, &args.name, args.runtime.as_deref(), Some(config), platform)
        .actionable_on("resolve runtime", args.name.clone())?;

    Output::header(format!("resolved '{}'", args.name));
    Output::kv("platform", platform.to_string());
    Output::kv("runtime", selection.runtime.to_string());
    Output::kv("source", format!("{:?}", selection.source));
    Output::kv("allowed on platform", command.allowed_runtimes(platform).iter().map(|r| r.to_string()).collect::<Vec<_>>().join(", "));
    Output::kv("script", selection.implementation.script);

    Ok(())
}
