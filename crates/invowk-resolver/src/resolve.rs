//! Runtime resolution precedence chain: CLI override, then config
//! default, then the command's own per-platform default.
//!
//! `resolve` is a pure function of its arguments — platform and config are
//! passed in rather than read from the host at the call site — so the
//! precedence chain stays deterministic under test.

use invowk_errors::InvowkErrorKind;
use invowk_model::{Command, Config, Platform, RuntimeMode, RuntimeSelection, RuntimeSource};

/// `resolve(command, command_name, runtime_override?, config?, platform) → RuntimeSelection`.
///
/// `command_name` is carried separately from `command.name` because the
/// caller may be resolving an alias; it only affects error messages.
pub fn resolve(
    command: &Command,
    command_name: &str,
    runtime_override: Option<&str>,
    config: Option<&Config>,
    platform: Platform,
) -> Result<RuntimeSelection, InvowkErrorKind> {
    if let Some(raw) = runtime_override {
        if !raw.is_empty() {
            return resolve_override(command, command_name, raw, platform);
        }
    }

    if let Some(config) = config {
        if let Some(selection) = try_config_default(command, platform, config)? {
            return Ok(selection);
        }
    }

    resolve_command_default(command, command_name, platform)
}

fn resolve_override(
    command: &Command,
    command_name: &str,
    raw: &str,
    platform: Platform,
) -> Result<RuntimeSelection, InvowkErrorKind> {
    let runtime: RuntimeMode = raw
        .parse()
        .map_err(|_| InvowkErrorKind::InvalidRuntimeMode(raw.to_string()))?;

    let allowed = command.allowed_runtimes(platform);
    if !allowed.contains(&runtime) {
        return Err(InvowkErrorKind::RuntimeNotAllowed {
            command_name: command_name.to_string(),
            runtime: runtime.to_string(),
            platform: platform.to_string(),
            allowed_runtimes: allowed.iter().map(RuntimeMode::to_string).collect(),
        });
    }

    let implementation = command
        .implementation_for(platform, runtime)
        .ok_or_else(|| InvowkErrorKind::NoImplementation {
            command_name: command_name.to_string(),
            platform: platform.to_string(),
            runtime: runtime.to_string(),
        })?;

    Ok(RuntimeSelection {
        runtime,
        source: RuntimeSource::CliOverride,
        implementation: implementation.clone(),
    })
}

/// Step 2: a valid-but-disallowed config default silently falls through to
/// step 3 (Open Question #2 / boundary scenario 2) — only a *malformed*
/// string is fatal here.
fn try_config_default(
    command: &Command,
    platform: Platform,
    config: &Config,
) -> Result<Option<RuntimeSelection>, InvowkErrorKind> {
    let Some(parsed) = config.parsed_default_runtime() else {
        return Ok(None);
    };
    let runtime = parsed.map_err(InvowkErrorKind::InvalidConfigRuntimeMode)?;

    if !command.allowed_runtimes(platform).contains(&runtime) {
        return Ok(None);
    }

    let Some(implementation) = command.implementation_for(platform, runtime) else {
        return Ok(None);
    };

    Ok(Some(RuntimeSelection {
        runtime,
        source: RuntimeSource::ConfigDefault,
        implementation: implementation.clone(),
    }))
}

fn resolve_command_default(
    command: &Command,
    command_name: &str,
    platform: Platform,
) -> Result<RuntimeSelection, InvowkErrorKind> {
    let runtime = command
        .default_runtime_for(platform)
        .ok_or_else(|| InvowkErrorKind::NoImplementation {
            command_name: command_name.to_string(),
            platform: platform.to_string(),
            runtime: "<none declared>".to_string(),
        })?;

    let implementation = command
        .implementation_for(platform, runtime)
        .ok_or_else(|| InvowkErrorKind::NoImplementation {
            command_name: command_name.to_string(),
            platform: platform.to_string(),
            runtime: runtime.to_string(),
        })?;

    Ok(RuntimeSelection {
        runtime,
        source: RuntimeSource::CommandDefault,
        implementation: implementation.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use invowk_model::{ArgDef, Command, Implementation};

    fn implementation(runtimes: &[RuntimeMode], platforms: &[Platform]) -> Implementation {
        Implementation {
            runtimes: runtimes.to_vec(),
            platforms: platforms.to_vec(),
            script: "echo hi".to_string(),
        }
    }

    fn command(implementations: Vec<Implementation>) -> Command {
        Command {
            name: "build".to_string(),
            description: String::new(),
            implementations,
            flags: Vec::new(),
            args: Vec::<ArgDef>::new(),
            env: Vec::new(),
            working_dir: None,
            dependencies: Vec::new(),
        }
    }

    #[test]
    fn cli_override_takes_precedence_over_config_default() {
        let command = command(vec![implementation(
            &[RuntimeMode::Virtual, RuntimeMode::Native],
            &[Platform::Linux],
        )]);
        let mut config = Config::default();
        config.default_runtime = Some("native".to_string());

        let selection = resolve(
            &command,
            "build",
            Some("virtual"),
            Some(&config),
            Platform::Linux,
        )
        .unwrap();

        assert_eq!(selection.runtime, RuntimeMode::Virtual);
        assert_eq!(selection.source, RuntimeSource::CliOverride);
    }

    #[test]
    fn invalid_override_string_is_rejected() {
        let command = command(vec![implementation(&[RuntimeMode::Native], &[Platform::Linux])]);
        let err = resolve(&command, "build", Some("bogus"), None, Platform::Linux).unwrap_err();
        assert!(matches!(err, InvowkErrorKind::InvalidRuntimeMode(value) if value == "bogus"));
    }

    #[test]
    fn override_not_permitted_reports_allowed_set() {
        let command = command(vec![implementation(&[RuntimeMode::Native], &[Platform::Linux])]);
        let err = resolve(&command, "build", Some("container"), None, Platform::Linux).unwrap_err();
        match err {
            InvowkErrorKind::RuntimeNotAllowed {
                command_name,
                runtime,
                platform,
                allowed_runtimes,
            } => {
                assert_eq!(command_name, "build");
                assert_eq!(runtime, "container");
                assert_eq!(platform, "linux");
                assert_eq!(allowed_runtimes, vec!["native".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_config_default_is_fatal() {
        let command = command(vec![implementation(&[RuntimeMode::Virtual], &[Platform::Linux])]);
        let mut config = Config::default();
        config.default_runtime = Some("bogus".to_string());

        let err = resolve(&command, "build", None, Some(&config), Platform::Linux).unwrap_err();
        assert!(matches!(err, InvowkErrorKind::InvalidConfigRuntimeMode(value) if value == "bogus"));
    }

    #[test]
    fn valid_but_disallowed_config_default_falls_through_to_command_default() {
        let command = command(vec![implementation(&[RuntimeMode::Virtual], &[Platform::Linux])]);
        let mut config = Config::default();
        config.default_runtime = Some("native".to_string());

        let selection = resolve(&command, "build", None, Some(&config), Platform::Linux).unwrap();
        assert_eq!(selection.runtime, RuntimeMode::Virtual);
        assert_eq!(selection.source, RuntimeSource::CommandDefault);
    }

    #[test]
    fn no_config_falls_back_to_command_default() {
        let command = command(vec![implementation(
            &[RuntimeMode::Native, RuntimeMode::Container],
            &[Platform::Linux],
        )]);
        let selection = resolve(&command, "build", None, None, Platform::Linux).unwrap();
        assert_eq!(selection.runtime, RuntimeMode::Native);
        assert_eq!(selection.source, RuntimeSource::CommandDefault);
    }
}
