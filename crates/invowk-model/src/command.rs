//! Command / Implementation data model: the user-visible verb and the
//! `(platform, runtime) -> Implementation` lookup the resolver needs.

use crate::platform::Platform;
use crate::runtime_mode::RuntimeMode;
use thiserror::Error;

/// "how to run a command on a platform x runtime pair".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Implementation {
    pub runtimes: Vec<RuntimeMode>,
    pub platforms: Vec<Platform>,
    pub script: String,
}

impl Implementation {
    pub fn supports(&self, platform: Platform, runtime: RuntimeMode) -> bool {
        self.platforms.contains(&platform) && self.runtimes.contains(&runtime)
    }
}

/// A declared positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgDef {
    pub name: String,
    pub required: bool,
    pub variadic: bool,
    pub default: Option<String>,
}

/// A declared flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDef {
    pub name: String,
}

/// The user-visible verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub description: String,
    pub implementations: Vec<Implementation>,
    pub flags: Vec<FlagDef>,
    pub args: Vec<ArgDef>,
    pub env: Vec<String>,
    pub working_dir: Option<String>,
    pub dependencies: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandValidationError {
    #[error("command name must not be empty")]
    EmptyName,
    #[error("({platform}, {runtime}) is supported by {count} implementations, expected exactly one")]
    AmbiguousImplementation {
        platform: Platform,
        runtime: RuntimeMode,
        count: usize,
    },
    #[error("only the last argument may be variadic; '{name}' is variadic but not last")]
    VariadicNotLast { name: String },
    #[error("at most one argument may be variadic; found a second one at '{name}'")]
    MultipleVariadic { name: String },
}

impl Command {
    /// The single implementation registered for `(platform, runtime)`, if any.
    pub fn implementation_for(&self, platform: Platform, runtime: RuntimeMode) -> Option<&Implementation> {
        self.implementations
            .iter()
            .find(|implementation| implementation.supports(platform, runtime))
    }

    /// Runtimes this command permits on `platform`, in declared preference
    /// order (the order `implementations` lists them in).
    pub fn allowed_runtimes(&self, platform: Platform) -> Vec<RuntimeMode> {
        let mut seen = Vec::new();
        for implementation in &self.implementations {
            if !implementation.platforms.contains(&platform) {
                continue;
            }
            for runtime in &implementation.runtimes {
                if !seen.contains(runtime) {
                    seen.push(*runtime);
                }
            }
        }
        seen
    }

    /// The command-level default runtime for `platform`: the first runtime
    /// listed for that platform across `implementations` in order.
    pub fn default_runtime_for(&self, platform: Platform) -> Option<RuntimeMode> {
        self.allowed_runtimes(platform).into_iter().next()
    }

    /// Validate the structural invariants placed on `Command`: a non-empty
    /// name, at most one implementation per `(platform, runtime)` pair,
    /// and at most one trailing variadic argument.
    pub fn validate(&self) -> Result<(), CommandValidationError> {
        if self.name.trim().is_empty() {
            return Err(CommandValidationError::EmptyName);
        }

        for platform in Platform::ALL {
            for runtime in RuntimeMode::ALL {
                let count = self
                    .implementations
                    .iter()
                    .filter(|implementation| implementation.supports(platform, runtime))
                    .count();
                if count > 1 {
                    return Err(CommandValidationError::AmbiguousImplementation {
                        platform,
                        runtime,
                        count,
                    });
                }
            }
        }

        let mut variadic_seen = false;
        for (index, arg) in self.args.iter().enumerate() {
            if arg.variadic {
                if variadic_seen {
                    return Err(CommandValidationError::MultipleVariadic {
                        name: arg.name.clone(),
                    });
                }
                variadic_seen = true;
                if index != self.args.len() - 1 {
                    return Err(CommandValidationError::VariadicNotLast {
                        name: arg.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
