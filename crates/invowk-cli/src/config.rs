//! Config loading seam: reads the persistent TOML config file and projects
//! it into the in-memory [`invowk_model::Config`] the resolver consumes.
//!
//! `ConfigSource` is a swappable seam in place of a `LoadOptions`-style
//! global: the CLI binary loads real TOML files, tests inject an
//! in-memory fixture. Unknown TOML keys are schema errors, enforced via
//! `deny_unknown_fields`.

use invowk_errors::InvowkErrorKind;
use invowk_model::{
    ColorScheme, Config, ContainerAutoProvision, ContainerEngine, EnvInheritMode, IncludeEntry,
    UiSettings,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value in config file {path}: {source}")]
    InvalidValue {
        path: PathBuf,
        #[source]
        source: InvowkErrorKind,
    },
}

pub trait ConfigSource {
    fn load(&self) -> Result<Config, ConfigLoadError>;
}

/// Loads from a TOML file on disk. Missing file ⇒ `Config::default()`
/// (a not-yet-configured project is not an error).
pub struct FileConfigSource {
    pub path: PathBuf,
}

impl ConfigSource for FileConfigSource {
    fn load(&self) -> Result<Config, ConfigLoadError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Config::default());
            }
            Err(err) => {
                return Err(ConfigLoadError::Read {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };
        parse_toml(&text, &self.path)
    }
}

/// In-memory fixture source for tests.
pub struct FixtureConfigSource(pub Config);

impl ConfigSource for FixtureConfigSource {
    fn load(&self) -> Result<Config, ConfigLoadError> {
        Ok(self.0.clone())
    }
}

fn parse_toml(text: &str, path: &Path) -> Result<Config, ConfigLoadError> {
    let raw: RawConfig = toml::from_str(text).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    raw.into_config().map_err(|source| ConfigLoadError::InvalidValue {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    container_engine: Option<String>,
    default_runtime: Option<String>,
    #[serde(default)]
    includes: Vec<RawInclude>,
    #[serde(default)]
    ui: RawUi,
    #[serde(default)]
    container_auto_provision: RawAutoProvision,
    env_inherit_mode: Option<String>,
    #[serde(default)]
    env_allow: Vec<String>,
    #[serde(default)]
    env_deny: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawInclude {
    path: PathBuf,
    alias: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawUi {
    color_scheme: Option<String>,
    #[serde(default)]
    verbose: bool,
    interactive: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAutoProvision {
    #[serde(default)]
    enabled: bool,
    image: Option<String>,
}

impl RawConfig {
    /// A malformed `container_engine`/`color_scheme`/`env_inherit_mode`
    /// string is a schema error (spec.md §7's `InvalidContainerEngine` /
    /// `InvalidColorScheme` / `InvalidEnvInheritMode`), not a silent
    /// fallback to the default — only an *absent* field defaults.
    fn into_config(self) -> Result<Config, InvowkErrorKind> {
        let defaults = Config::default();

        let container_engine = match self.container_engine.as_deref() {
            Some(raw) => raw
                .parse::<ContainerEngine>()
                .map_err(|_| InvowkErrorKind::InvalidContainerEngine(raw.to_string()))?,
            None => defaults.container_engine,
        };

        let color_scheme = match self.ui.color_scheme.as_deref() {
            Some(raw) => raw
                .parse::<ColorScheme>()
                .map_err(|_| InvowkErrorKind::InvalidColorScheme(raw.to_string()))?,
            None => defaults.ui.color_scheme,
        };

        let env_inherit_mode = match self.env_inherit_mode.as_deref() {
            Some(raw) => Some(
                raw.parse::<EnvInheritMode>()
                    .map_err(|_| InvowkErrorKind::InvalidEnvInheritMode(raw.to_string()))?,
            ),
            None => None,
        };

        Ok(Config {
            container_engine,
            default_runtime: self.default_runtime,
            includes: self
                .includes
                .into_iter()
                .map(|entry| IncludeEntry {
                    absolute_path: entry.path,
                    alias: entry.alias,
                })
                .collect(),
            ui: UiSettings {
                color_scheme,
                verbose: self.ui.verbose,
                interactive: self.ui.interactive.unwrap_or(defaults.ui.interactive),
            },
            container_auto_provision: ContainerAutoProvision {
                enabled: self.container_auto_provision.enabled,
                image: self.container_auto_provision.image,
            },
            env_inherit_mode,
            env_allow: self.env_allow,
            env_deny: self.env_deny,
        })
    }
}
