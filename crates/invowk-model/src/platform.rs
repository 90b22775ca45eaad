//! Platform tags: a closed set of opaque identifiers compared for exact
//! equality — `linux`, `mac`, `windows`, nothing else.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Linux,
    Mac,
    Windows,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid platform tag: '{0}'")]
pub struct InvalidPlatform(pub String);

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Linux, Platform::Mac, Platform::Windows];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Mac => "mac",
            Platform::Windows => "windows",
        }
    }

    /// The platform tag for the host this binary is currently running on.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => Platform::Mac,
            "windows" => Platform::Windows,
            _ => Platform::Linux,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = InvalidPlatform;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "linux" => Ok(Platform::Linux),
            "mac" => Ok(Platform::Mac),
            "windows" => Ok(Platform::Windows),
            other => Err(InvalidPlatform(other.to_string())),
        }
    }
}
