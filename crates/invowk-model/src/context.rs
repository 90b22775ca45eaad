//! ExecutionContext: everything the resolver assembles before a command is
//! handed to the process launcher — a flat struct of launch inputs
//! assembled once per invocation ahead of execution.

use crate::env_inherit::EnvInheritMode;
use crate::platform::Platform;
use crate::selection::RuntimeSelection;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The env-related knobs an `ExecutionContext` carries forward from config,
/// CLI flags, and the command definition itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvBlock {
    pub runtime_env_files: Vec<PathBuf>,
    pub runtime_env_vars: BTreeMap<String, String>,
    pub inherit_mode_override: Option<EnvInheritMode>,
    pub inherit_allow_override: Vec<String>,
    pub inherit_deny_override: Vec<String>,
    pub extra_env: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    pub command_name: String,
    pub platform: Platform,
    pub selection: RuntimeSelection,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: EnvBlock,
    pub verbose: bool,
    pub force_rebuild: bool,
}

impl ExecutionContext {
    pub fn implementation_script(&self) -> &str {
        &self.selection.implementation.script
    }
}
