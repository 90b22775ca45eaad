//! The closed error-kind taxonomy shared across every crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvowkErrorKind {
    #[error("invalid runtime mode: '{0}'")]
    InvalidRuntimeMode(String),

    #[error("invalid config runtime mode: '{0}'")]
    InvalidConfigRuntimeMode(String),

    #[error("invalid color scheme: '{0}'")]
    InvalidColorScheme(String),

    #[error("invalid container engine: '{0}'")]
    InvalidContainerEngine(String),

    #[error(
        "runtime '{runtime}' is not allowed for command '{command_name}' on {platform}; allowed: {}",
        allowed_runtimes.join(", ")
    )]
    RuntimeNotAllowed {
        command_name: String,
        runtime: String,
        platform: String,
        allowed_runtimes: Vec<String>,
    },

    #[error("command '{command_name}' has no implementation for {platform}/{runtime}")]
    NoImplementation {
        command_name: String,
        platform: String,
        runtime: String,
    },

    #[error("missing required input: {0}")]
    MissingRequiredInput(String),

    #[error("invalid env inherit mode: '{0}'")]
    InvalidEnvInheritMode(String),

    #[error("invalid environment variable name: '{0}'")]
    InvalidEnvVarName(String),

    #[error("invalid version: '{0}'")]
    InvalidVersion(String),

    #[error("release not found: {0}")]
    ReleaseNotFound(String),

    #[error("asset not found for pattern '{0}'")]
    AssetNotFound(String),

    #[error("GitHub API rate limit exceeded: {remaining}/{limit} remaining, resets at {reset_time}")]
    RateLimitExceeded {
        limit: u32,
        remaining: u32,
        reset_time: String,
    },

    #[error("checksum mismatch for {filename}: expected {expected}, got {got}")]
    ChecksumMismatch {
        expected: String,
        got: String,
        filename: String,
    },

    #[error("invalid TUI component: '{0}'")]
    InvalidComponent(String),

    #[error("invalid or missing sidecar auth token")]
    InvalidAuthToken,

    #[error("operation cancelled by user")]
    UserCancelled,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
