//! EnvInheritMode and the environment-variable-name validation shared by the
//! config projection and the execution-context builder.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvInheritMode {
    None,
    Allow,
    All,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid env inherit mode: '{0}'")]
pub struct InvalidEnvInheritMode(pub String);

impl EnvInheritMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvInheritMode::None => "none",
            EnvInheritMode::Allow => "allow",
            EnvInheritMode::All => "all",
        }
    }
}

impl fmt::Display for EnvInheritMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvInheritMode {
    type Err = InvalidEnvInheritMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(EnvInheritMode::None),
            "allow" => Ok(EnvInheritMode::Allow),
            "all" => Ok(EnvInheritMode::All),
            other => Err(InvalidEnvInheritMode(other.to_string())),
        }
    }
}

/// Names must match the OS environment-variable convention: letters,
/// digits, underscore; must not start with a digit; must not be empty.
pub fn is_valid_env_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if first.is_ascii_digit() {
        return false;
    }
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
