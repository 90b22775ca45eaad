//! Hand-built in-memory `Command`/`Implementation` fixtures backing the
//! `run`/`resolve` demo subcommands.
//!
//! The declarative command-definition format itself is out of scope here;
//! commands are treated as an already-validated in-memory model, so this
//! module builds that model directly for the CLI's own demo commands
//! instead of parsing it from any on-disk format.

use invowk_model::{ArgDef, Command, FlagDef, Implementation, Platform, RuntimeMode};

/// Look up one of the built-in demo commands by name.
pub fn lookup(name: &str) -> Option<Command> {
    all().into_iter().find(|command| command.name == name)
}

pub fn names() -> Vec<String> {
    all().into_iter().map(|command| command.name).collect()
}

fn all() -> Vec<Command> {
    vec![greet(), build(), deploy()]
}

/// `greet [name...]` — native only, everywhere. Exercises variadic
/// argument projection.
fn greet() -> Command {
    Command {
        name: "greet".to_string(),
        description: "Print a friendly greeting to each name given".to_string(),
        implementations: vec![Implementation {
            runtimes: vec![RuntimeMode::Native],
            platforms: vec![Platform::Linux, Platform::Mac, Platform::Windows],
            script: r#"for name in "$@"; do echo "hello, $name"; done"#.to_string(),
        }],
        flags: vec![FlagDef {
            name: "loud".to_string(),
        }],
        args: vec![ArgDef {
            name: "names".to_string(),
            required: false,
            variadic: true,
            default: Some("world".to_string()),
        }],
        env: Vec::new(),
        working_dir: None,
        dependencies: Vec::new(),
    }
}

/// `build` — offers native and virtual on Linux/Mac, native only on
/// Windows. Exercises the runtime-preference-order and per-platform
/// default rules.
fn build() -> Command {
    Command {
        name: "build".to_string(),
        description: "Build the project with the preferred runtime for this platform".to_string(),
        implementations: vec![
            Implementation {
                runtimes: vec![RuntimeMode::Virtual, RuntimeMode::Native],
                platforms: vec![Platform::Linux, Platform::Mac],
                script: "make build".to_string(),
            },
            Implementation {
                runtimes: vec![RuntimeMode::Native],
                platforms: vec![Platform::Windows],
                script: "make build".to_string(),
            },
        ],
        flags: vec![FlagDef {
            name: "release".to_string(),
        }],
        args: vec![ArgDef {
            name: "target".to_string(),
            required: false,
            variadic: false,
            default: Some("all".to_string()),
        }],
        env: Vec::new(),
        working_dir: None,
        dependencies: Vec::new(),
    }
}

/// `deploy` — container only, everywhere. Picking this as the resolved
/// command with `--runtime native` demonstrates *RuntimeNotAllowed*.
fn deploy() -> Command {
    Command {
        name: "deploy".to_string(),
        description: "Deploy the built artifact via the container runtime".to_string(),
        implementations: vec![Implementation {
            runtimes: vec![RuntimeMode::Container],
            platforms: vec![Platform::Linux, Platform::Mac, Platform::Windows],
            script: "./deploy.sh".to_string(),
        }],
        flags: Vec::new(),
        args: vec![ArgDef {
            name: "environment".to_string(),
            required: true,
            variadic: false,
            default: None,
        }],
        env: Vec::new(),
        working_dir: None,
        dependencies: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_known_commands() {
        assert!(lookup("greet").is_some());
        assert!(lookup("build").is_some());
        assert!(lookup("deploy").is_some());
        assert!(lookup("nonexistent").is_none());
    }

    #[test]
    fn every_demo_command_validates() {
        for command in all() {
            command.validate().unwrap();
        }
    }
}
