//! Config: the consumed projection of the persistent config file.

use crate::env_inherit::EnvInheritMode;
use crate::include::IncludeEntry;
use crate::runtime_mode::RuntimeMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerEngine {
    Podman,
    Docker,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid container engine: '{0}'")]
pub struct InvalidContainerEngine(pub String);

impl ContainerEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerEngine::Podman => "podman",
            ContainerEngine::Docker => "docker",
        }
    }
}

impl fmt::Display for ContainerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerEngine {
    type Err = InvalidContainerEngine;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "podman" => Ok(ContainerEngine::Podman),
            "docker" => Ok(ContainerEngine::Docker),
            other => Err(InvalidContainerEngine(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color scheme: '{0}'")]
pub struct InvalidColorScheme(pub String);

impl FromStr for ColorScheme {
    type Err = InvalidColorScheme;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "auto" => Ok(ColorScheme::Auto),
            "always" => Ok(ColorScheme::Always),
            "never" => Ok(ColorScheme::Never),
            other => Err(InvalidColorScheme(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiSettings {
    pub color_scheme: ColorScheme,
    pub verbose: bool,
    pub interactive: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Auto,
            verbose: false,
            interactive: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContainerAutoProvision {
    pub enabled: bool,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub container_engine: ContainerEngine,
    /// Raw string so the resolver can classify malformed values as
    /// *InvalidConfigRuntimeMode* rather than silently defaulting.
    pub default_runtime: Option<String>,
    pub includes: Vec<IncludeEntry>,
    pub ui: UiSettings,
    pub container_auto_provision: ContainerAutoProvision,
    pub env_inherit_mode: Option<EnvInheritMode>,
    pub env_allow: Vec<String>,
    pub env_deny: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            container_engine: ContainerEngine::Podman,
            default_runtime: None,
            includes: Vec::new(),
            ui: UiSettings::default(),
            container_auto_provision: ContainerAutoProvision::default(),
            env_inherit_mode: None,
            env_allow: Vec::new(),
            env_deny: Vec::new(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error(transparent)]
    Includes(#[from] crate::include::IncludeValidationError),
}

impl Config {
    /// Resolve `default_runtime` into a typed `RuntimeMode`, if set and
    /// well-formed. A malformed value is surfaced to the caller (the
    /// resolver turns this into *InvalidConfigRuntimeMode*); it is not
    /// validated here because an unset value is not an error.
    pub fn parsed_default_runtime(&self) -> Option<Result<RuntimeMode, String>> {
        self.default_runtime
            .as_ref()
            .map(|raw| raw.parse::<RuntimeMode>().map_err(|_| raw.clone()))
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        crate::include::validate_includes(&self.includes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_runtime_none_is_not_an_error() {
        let config = Config::default();
        assert!(config.parsed_default_runtime().is_none());
    }

    #[test]
    fn malformed_default_runtime_is_reported_but_not_fatal_here() {
        let mut config = Config::default();
        config.default_runtime = Some("bogus".to_string());
        assert_eq!(
            config.parsed_default_runtime(),
            Some(Err("bogus".to_string()))
        );
    }

    #[test]
    fn well_formed_default_runtime_parses() {
        let mut config = Config::default();
        config.default_runtime = Some("virtual".to_string());
        assert_eq!(
            config.parsed_default_runtime(),
            Some(Ok(RuntimeMode::Virtual))
        );
    }
}
