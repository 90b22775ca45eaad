//! `invowk update` — wraps the self-update engine's `check`/`apply` flow
//! for operator use.

use crate::errors_ext::ActionableResultExt;
use crate::output::Output;
use anyhow::Context;
use clap::{Args, Subcommand};
use invowk_selfupdate::{apply, check, CheckOptions, GithubClient, InstallMethod};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[command(subcommand)]
    pub action: UpdateAction,
}

#[derive(Debug, Subcommand)]
pub enum UpdateAction {
    /// Check whether an upgrade is available without downloading anything.
    Check {
        /// Exact release to compare against instead of the latest stable.
        #[arg(long)]
        target: Option<String>,

        /// GitHub `owner/repo` to query.
        #[arg(long, default_value = "invowk/invowk")]
        repo: String,
    },
    /// Download, verify, and atomically install an update.
    Apply {
        #[arg(long)]
        target: Option<String>,

        #[arg(long, default_value = "invowk/invowk")]
        repo: String,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(args: UpdateArgs) -> anyhow::Result<()> {
    match args.action {
        UpdateAction::Check { target, repo } => run_check(&repo, target.as_deref()),
        UpdateAction::Apply { target, repo, yes } => run_apply(&repo, target.as_deref(), yes),
    }
}

fn github_client() -> GithubClient {
    GithubClient::new(
        "api.github.com",
        std::env::var("GITHUB_TOKEN").ok(),
        concat!("invowk/", env!("CARGO_PKG_VERSION")),
    )
}

fn resolved_binary_path() -> anyhow::Result<PathBuf> {
    let current = std::env::current_exe().context("failed to resolve the running executable path")?;
    Ok(std::fs::canonicalize(&current).unwrap_or(current))
}

fn gopath() -> PathBuf {
    std::env::var("GOPATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join("go"))
                .unwrap_or_default()
        })
}

fn run_check(repo: &str, target: Option<&str>) -> anyhow::Result<()> {
    let client = github_client();
    let binary_path = resolved_binary_path()?;
    let gopath = gopath();

    let outcome = check(
        &client,
        CheckOptions {
            repo,
            current_version: env!("CARGO_PKG_VERSION"),
            target_version: target,
            binary_path: &binary_path,
            build_time_hint: option_env!("INVOWK_INSTALL_METHOD_HINT"),
            gopath: Some(gopath.as_path()),
            declared_module_path: option_env!("INVOWK_GO_MODULE_PATH"),
        },
    )
    .actionable_on("check for an update", repo.to_string())?;

    Output::header("update check");
    Output::kv("install method", outcome.install_method.as_str());
    Output::kv("current version", outcome.current_version.clone());
    Output::kv("latest version", outcome.latest_version.clone());
    if outcome.upgrade_available {
        Output::success(outcome.message.clone());
    } else {
        Output::info(outcome.message.clone());
    }

    Ok(())
}

fn run_apply(repo: &str, target: Option<&str>, yes: bool) -> anyhow::Result<()> {
    let client = github_client();
    let binary_path = resolved_binary_path()?;
    let gopath = gopath();

    let outcome = check(
        &client,
        CheckOptions {
            repo,
            current_version: env!("CARGO_PKG_VERSION"),
            target_version: target,
            binary_path: &binary_path,
            build_time_hint: option_env!("INVOWK_INSTALL_METHOD_HINT"),
            gopath: Some(gopath.as_path()),
            declared_module_path: option_env!("INVOWK_GO_MODULE_PATH"),
        },
    )
    .actionable_on("check for an update", repo.to_string())?;

    if matches!(outcome.install_method, InstallMethod::Homebrew | InstallMethod::GoInstall) {
        Output::info(outcome.message.clone());
        return Ok(());
    }

    let Some(release) = &outcome.target_release else {
        Output::info("already up to date".to_string());
        return Ok(());
    };

    if !outcome.upgrade_available {
        Output::info(outcome.message.clone());
        return Ok(());
    }

    if !yes {
        Output::warning(format!(
            "about to replace the running binary at {} with {} — re-run with --yes to proceed",
            binary_path.display(),
            release.tag_name
        ));
        return Ok(());
    }

    let spinner = Output::spinner(format!("downloading and verifying {}", release.tag_name));
    let result = apply(&client, Some(release), &binary_path, outcome.install_method)
        .actionable_on("apply update", release.tag_name.clone());

    match result {
        Ok(()) => {
            spinner.finish_success(format!("updated to {}", release.tag_name));
            Ok(())
        }
        Err(err) => {
            spinner.finish_error("update failed; the original binary is unchanged");
            Err(err)
        }
    }
}
