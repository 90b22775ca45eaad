//! Execution-context construction and deterministic environment projection.
//!
//! Everything needed to launch a command — positional args, flag values,
//! the env-inheritance policy, and the derived `INVOWK_*` variables — is
//! assembled and validated eagerly here, ahead of launch.

use invowk_errors::InvowkErrorKind;
use invowk_model::{
    is_valid_env_var_name, Command, EnvBlock, EnvInheritMode, ExecutionContext, Platform,
    RuntimeSelection,
};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub struct BuildOptions<'a> {
    pub command: Option<&'a Command>,
    pub file: Option<&'a str>,
    pub selection: RuntimeSelection,
    pub positional_args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub force_rebuild: bool,
    pub verbose: bool,
    pub runtime_env_files: Vec<PathBuf>,
    pub runtime_env_vars: BTreeMap<String, String>,
    pub inherit_mode_override: Option<String>,
    pub inherit_allow_override: Vec<String>,
    pub inherit_deny_override: Vec<String>,
    pub flags: BTreeMap<String, String>,
    pub source_id: Option<String>,
    pub platform: Platform,
}

pub fn build(options: BuildOptions<'_>) -> Result<ExecutionContext, InvowkErrorKind> {
    let command = options
        .command
        .ok_or_else(|| InvowkErrorKind::MissingRequiredInput("command".to_string()))?;
    if options.file.is_none() {
        return Err(InvowkErrorKind::MissingRequiredInput("file".to_string()));
    }

    let inherit_mode_override = match options.inherit_mode_override {
        Some(raw) => Some(
            raw.parse::<EnvInheritMode>()
                .map_err(|_| InvowkErrorKind::InvalidEnvInheritMode(raw.clone()))?,
        ),
        None => None,
    };

    for name in options
        .inherit_allow_override
        .iter()
        .chain(options.inherit_deny_override.iter())
    {
        if !is_valid_env_var_name(name) {
            return Err(InvowkErrorKind::InvalidEnvVarName(name.clone()));
        }
    }

    let extra_env = project_environment(
        command,
        &options.selection,
        &options.positional_args,
        &options.flags,
        options.source_id.as_deref(),
        options.platform,
    );

    Ok(ExecutionContext {
        command_name: command.name.clone(),
        platform: options.platform,
        selection: options.selection,
        args: options.positional_args,
        working_dir: options.working_dir,
        env: EnvBlock {
            runtime_env_files: options.runtime_env_files,
            runtime_env_vars: options.runtime_env_vars,
            inherit_mode_override,
            inherit_allow_override: options.inherit_allow_override,
            inherit_deny_override: options.inherit_deny_override,
            extra_env,
        },
        verbose: options.verbose,
        force_rebuild: options.force_rebuild,
    })
}

/// Upper-cases `token`, mapping any non-identifier character to `_`.
fn env_token(token: &str) -> String {
    token
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn project_environment(
    command: &Command,
    selection: &RuntimeSelection,
    positional: &[String],
    flags: &BTreeMap<String, String>,
    source_id: Option<&str>,
    platform: Platform,
) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();

    env.insert("INVOWK_CMD_NAME".to_string(), command.name.clone());
    env.insert("INVOWK_RUNTIME".to_string(), selection.runtime.to_string());
    if let Some(source_id) = source_id.filter(|s| !s.is_empty()) {
        env.insert("INVOWK_SOURCE".to_string(), source_id.to_string());
    }
    env.insert("INVOWK_PLATFORM".to_string(), platform.to_string());

    for (index, value) in positional.iter().enumerate() {
        env.insert(format!("ARG{}", index + 1), value.clone());
    }
    env.insert("ARGC".to_string(), positional.len().to_string());

    for (index, arg_def) in command.args.iter().enumerate() {
        let key = format!("INVOWK_ARG_{}", env_token(&arg_def.name));
        if arg_def.variadic {
            let values = &positional[index.min(positional.len())..];
            env.insert(key.clone(), values.join(" "));
            env.insert(format!("{key}_COUNT"), values.len().to_string());
            for (j, value) in values.iter().enumerate() {
                env.insert(format!("{key}_{}", j + 1), value.clone());
            }
        } else if index < positional.len() {
            env.insert(key, positional[index].clone());
        } else if let Some(default) = &arg_def.default {
            env.insert(key, default.clone());
        }
    }

    for flag_def in &command.flags {
        if let Some(value) = flags.get(&flag_def.name) {
            env.insert(format!("INVOWK_FLAG_{}", env_token(&flag_def.name)), value.clone());
        }
    }

    env
}

#[cfg(test)]
mod tests {
    use super::*;
    use invowk_model::{ArgDef, FlagDef, Implementation, RuntimeMode, RuntimeSource};

    fn selection() -> RuntimeSelection {
        RuntimeSelection {
            runtime: RuntimeMode::Native,
            source: RuntimeSource::CommandDefault,
            implementation: Implementation {
                runtimes: vec![RuntimeMode::Native],
                platforms: vec![Platform::Linux],
                script: "echo hi".to_string(),
            },
        }
    }

    fn command_with_variadic() -> Command {
        Command {
            name: "pack".to_string(),
            description: String::new(),
            implementations: vec![Implementation {
                runtimes: vec![RuntimeMode::Native],
                platforms: vec![Platform::Linux],
                script: "echo hi".to_string(),
            }],
            flags: vec![FlagDef {
                name: "dry-run".to_string(),
            }],
            args: vec![ArgDef {
                name: "files".to_string(),
                required: false,
                variadic: true,
                default: None,
            }],
            env: Vec::new(),
            working_dir: None,
            dependencies: Vec::new(),
        }
    }

    #[test]
    fn missing_command_is_rejected() {
        let result = build(BuildOptions {
            command: None,
            file: Some("commands.invk"),
            selection: selection(),
            positional_args: Vec::new(),
            working_dir: None,
            force_rebuild: false,
            verbose: false,
            runtime_env_files: Vec::new(),
            runtime_env_vars: BTreeMap::new(),
            inherit_mode_override: None,
            inherit_allow_override: Vec::new(),
            inherit_deny_override: Vec::new(),
            flags: BTreeMap::new(),
            source_id: None,
            platform: Platform::Linux,
        });
        assert!(matches!(
            result,
            Err(InvowkErrorKind::MissingRequiredInput(field)) if field == "command"
        ));
    }

    #[test]
    fn variadic_projection_matches_boundary_scenario() {
        let command = command_with_variadic();
        let positional = vec!["v1".to_string(), "v2".to_string(), "v3".to_string()];
        let mut flags = BTreeMap::new();
        flags.insert("dry-run".to_string(), "true".to_string());

        let ctx = build(BuildOptions {
            command: Some(&command),
            file: Some("commands.invk"),
            selection: selection(),
            positional_args: positional,
            working_dir: None,
            force_rebuild: false,
            verbose: false,
            runtime_env_files: Vec::new(),
            runtime_env_vars: BTreeMap::new(),
            inherit_mode_override: None,
            inherit_allow_override: Vec::new(),
            inherit_deny_override: Vec::new(),
            flags,
            source_id: None,
            platform: Platform::Linux,
        })
        .unwrap();

        let env = &ctx.env.extra_env;
        assert_eq!(env.get("ARG1").unwrap(), "v1");
        assert_eq!(env.get("ARG2").unwrap(), "v2");
        assert_eq!(env.get("ARG3").unwrap(), "v3");
        assert_eq!(env.get("ARGC").unwrap(), "3");
        assert_eq!(env.get("INVOWK_ARG_FILES").unwrap(), "v1 v2 v3");
        assert_eq!(env.get("INVOWK_ARG_FILES_COUNT").unwrap(), "3");
        assert_eq!(env.get("INVOWK_ARG_FILES_1").unwrap(), "v1");
        assert_eq!(env.get("INVOWK_ARG_FILES_2").unwrap(), "v2");
        assert_eq!(env.get("INVOWK_ARG_FILES_3").unwrap(), "v3");
        assert_eq!(env.get("INVOWK_FLAG_DRY_RUN").unwrap(), "true");
        assert!(!env.contains_key("INVOWK_SOURCE"));
    }

    #[test]
    fn invalid_inherit_allow_name_is_rejected() {
        let command = command_with_variadic();
        let result = build(BuildOptions {
            command: Some(&command),
            file: Some("commands.invk"),
            selection: selection(),
            positional_args: Vec::new(),
            working_dir: None,
            force_rebuild: false,
            verbose: false,
            runtime_env_files: Vec::new(),
            runtime_env_vars: BTreeMap::new(),
            inherit_mode_override: None,
            inherit_allow_override: vec!["NOT-VALID".to_string()],
            inherit_deny_override: Vec::new(),
            flags: BTreeMap::new(),
            source_id: None,
            platform: Platform::Linux,
        });
        assert!(matches!(
            result,
            Err(InvowkErrorKind::InvalidEnvVarName(name)) if name == "NOT-VALID"
        ));
    }
}
