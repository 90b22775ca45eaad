//! `invowk run` — resolve a built-in demo command through the runtime
//! resolver and execution-context builder, then hand the resulting
//! context to a backend. Only the native backend (host shell) is
//! implemented here; the virtual and container backends are an external
//! execution layer, so this prints the resolved context instead of
//! faking one.

use crate::demo;
use crate::errors_ext::ActionableResultExt;
use crate::output::Output;
use anyhow::Context;
use clap::Args;
use invowk_model::{Config, ExecutionContext, Platform, RuntimeMode};
use invowk_resolver::{build, resolve, BuildOptions};
use std::collections::BTreeMap;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Name of a built-in demo command.
    pub name: String,

    /// Force a specific runtime (native, virtual, container).
    #[arg(long)]
    pub runtime: Option<String>,

    /// Force a specific platform tag; defaults to the host.
    #[arg(long)]
    pub platform: Option<String>,

    /// Force rebuild (propagated into the execution context only; no
    /// build cache exists in this core, so it has no other effect).
    #[arg(long = "force-rebuild")]
    pub force_rebuild: bool,

    /// Set a flag value as KEY=VALUE (repeatable).
    #[arg(long = "flag", value_parser = parse_key_val, value_name = "KEY=VALUE")]
    pub flags: Vec<(String, String)>,

    /// Positional arguments forwarded to the command.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

pub fn run(args: RunArgs, config: &Config, verbose: bool) -> anyhow::Result<()> {
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

    let mut flags = BTreeMap::new();
    for (key, value) in args.flags {
        flags.insert(key, value);
    }

    let ctx = build(BuildOptions {
        command: Some(&command),
        file: Some("<builtin demo command>"),
        selection,
        positional_args: args.args,
        working_dir: None,
        force_rebuild: args.force_rebuild,
        verbose,
        runtime_env_files: Vec::new(),
        runtime_env_vars: BTreeMap::new(),
        inherit_mode_override: None,
        inherit_allow_override: Vec::new(),
        inherit_deny_override: Vec::new(),
        flags,
        source_id: Some("invowk-cli".to_string()),
        platform,
    })
    .actionable_on("build execution context", args.name.clone())?;

    match ctx.selection.runtime {
        RuntimeMode::Native => execute_native(&ctx),
        other => {
            Output::warning(format!(
                "the '{other}' execution backend is external to this core; printing the resolved context instead of running it"
            ));
            print_context(&ctx);
            Ok(())
        }
    }
}

fn execute_native(ctx: &ExecutionContext) -> anyhow::Result<()> {
    Output::info(format!("running '{}' via the native host shell", ctx.command_name));

    let mut cmd = std::process::Command::new("sh");
    cmd.arg("-c").arg(ctx.implementation_script()).arg(&ctx.command_name);
    cmd.args(&ctx.args);
    if let Some(dir) = &ctx.working_dir {
        cmd.current_dir(dir);
    }
    for (key, value) in &ctx.env.extra_env {
        cmd.env(key, value);
    }
    for (key, value) in &ctx.env.runtime_env_vars {
        cmd.env(key, value);
    }

    let status = cmd.status().context("failed to spawn the native shell")?;
    if !status.success() {
        anyhow::bail!("'{}' exited with {status}", ctx.command_name);
    }
    Ok(())
}

fn print_context(ctx: &ExecutionContext) {
    Output::kv("command", ctx.command_name.clone());
    Output::kv("runtime", ctx.selection.runtime.to_string());
    Output::kv("script", ctx.implementation_script().to_string());
    Output::kv("args", ctx.args.join(" "));
    for (key, value) in &ctx.env.extra_env {
        Output::kv(format!("env.{key}"), value.clone());
    }
}
