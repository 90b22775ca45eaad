//! RuntimeMode: closed set `{native, virtual, container}`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuntimeMode {
    Native,
    Virtual,
    Container,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid runtime mode: '{0}'")]
pub struct InvalidRuntimeMode(pub String);

impl RuntimeMode {
    pub const ALL: [RuntimeMode; 3] = [
        RuntimeMode::Native,
        RuntimeMode::Virtual,
        RuntimeMode::Container,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeMode::Native => "native",
            RuntimeMode::Virtual => "virtual",
            RuntimeMode::Container => "container",
        }
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeMode {
    type Err = InvalidRuntimeMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "native" => Ok(RuntimeMode::Native),
            "virtual" => Ok(RuntimeMode::Virtual),
            "container" => Ok(RuntimeMode::Container),
            other => Err(InvalidRuntimeMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_display_and_parse() {
        for mode in RuntimeMode::ALL {
            let parsed: RuntimeMode = mode.as_str().parse().unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn rejects_unknown_values() {
        assert!("docker".parse::<RuntimeMode>().is_err());
        assert!("".parse::<RuntimeMode>().is_err());
    }
}
