//! Data model for command resolution: platform/runtime tags, the
//! `Command`/`Implementation` graph, config projection, and the
//! execution-context types the resolver assembles from them.
//!
//! No resolution logic lives here (that's `invowk-resolver`); this crate
//! only defines validated value types and their invariants.

pub mod command;
pub mod config;
pub mod context;
pub mod env_inherit;
pub mod include;
pub mod platform;
pub mod runtime_mode;
pub mod selection;

pub use command::{ArgDef, Command, CommandValidationError, FlagDef, Implementation};
pub use config::{
    ColorScheme, Config, ConfigValidationError, ContainerAutoProvision, ContainerEngine,
    InvalidColorScheme, InvalidContainerEngine, UiSettings,
};
pub use context::{EnvBlock, ExecutionContext};
pub use env_inherit::{is_valid_env_var_name, EnvInheritMode, InvalidEnvInheritMode};
pub use include::{IncludeEntry, IncludeValidationError};
pub use platform::{InvalidPlatform, Platform};
pub use runtime_mode::{InvalidRuntimeMode, RuntimeMode};
pub use selection::{RuntimeSelection, RuntimeSource};
