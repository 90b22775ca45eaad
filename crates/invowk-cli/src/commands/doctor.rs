//! `invowk doctor` — environment readiness report.
//!
//! A check-list of pass/fail probes over what this crate's own layers can
//! observe: platform detection, install-method detection, the resolved
//! config directory and config file, container engine availability, and
//! TUI sidecar reachability.

use crate::config_dir;
use crate::output::Output;
use clap::Args;
use invowk_model::Platform;
use invowk_tui::TuiClient;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DoctorArgs {
    /// Output format (table, json).
    #[arg(short, long, default_value = "table")]
    format: String,
}

struct CheckResult {
    name: &'static str,
    passed: bool,
    message: String,
}

fn pass(name: &'static str, message: impl Into<String>) -> CheckResult {
    CheckResult { name, passed: true, message: message.into() }
}

fn fail(name: &'static str, message: impl Into<String>) -> CheckResult {
    CheckResult { name, passed: false, message: message.into() }
}

pub fn run(args: DoctorArgs, config_path: Option<&PathBuf>) -> anyhow::Result<()> {
    let results = collect_results(config_path);

    if args.format == "json" {
        let json_results: Vec<_> = results
            .iter()
            .map(|r| serde_json::json!({"name": r.name, "passed": r.passed, "message": r.message}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_results)?);
        return Ok(());
    }

    Output::header("invowk doctor - checking environment readiness");
    Output::blank();

    let mut all_passed = true;
    for result in &results {
        if result.passed {
            Output::success(format!("{}: {}", result.name, result.message));
        } else {
            Output::error(format!("{}: {}", result.name, result.message));
            all_passed = false;
        }
    }

    Output::blank();
    if all_passed {
        Output::success("All checks passed.");
    } else {
        Output::warning("Some checks did not pass; see above.");
    }

    Ok(())
}

fn collect_results(config_path: Option<&PathBuf>) -> Vec<CheckResult> {
    vec![
        check_platform(),
        check_config(config_path),
        check_container_engine(),
        check_tui_sidecar(),
    ]
}

fn check_platform() -> CheckResult {
    pass("platform", format!("detected as {}", Platform::current()))
}

fn check_config(config_path: Option<&PathBuf>) -> CheckResult {
    if let Some(path) = config_path {
        return if path.exists() {
            pass("config", format!("using {}", path.display()))
        } else {
            fail("config", format!("{} does not exist", path.display()))
        };
    }

    match config_dir::host_config_dir() {
        Some(dir) => {
            let path = dir.join("config.toml");
            if path.exists() {
                pass("config", format!("using {}", path.display()))
            } else {
                pass("config", format!("no config file at {} (defaults apply)", path.display()))
            }
        }
        None => fail("config", "could not resolve a platform config directory (HOME/APPDATA unset?)"),
    }
}

fn check_container_engine() -> CheckResult {
    for engine in ["docker", "podman"] {
        if which(engine).is_some() {
            return pass("container engine", format!("found '{engine}' on PATH"));
        }
    }
    fail("container engine", "neither 'docker' nor 'podman' found on PATH; container-runtime commands will fail")
}

fn check_tui_sidecar() -> CheckResult {
    match TuiClient::from_environment() {
        Some(client) if client.is_available() => pass("tui sidecar", "reachable via INVOWK_TUI_ADDR"),
        Some(_) => fail("tui sidecar", "INVOWK_TUI_ADDR is set but the sidecar did not respond"),
        None => pass("tui sidecar", "not in a sidecar session (ok when run as a top-level invocation)"),
    }
}

fn which(cmd: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).map(|dir| dir.join(cmd)).find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_platform_always_passes() {
        assert!(check_platform().passed);
    }

    #[test]
    fn check_config_with_missing_explicit_path_fails() {
        let path = PathBuf::from("/nonexistent/invowk/config.toml");
        let result = check_config(Some(&path));
        assert!(!result.passed);
    }
}
