//! Property-based tests for the resolver's quantified invariants (spec §8:
//! Testable Properties).
//!
//! These generate random command/override/platform combinations rather
//! than pinning a handful of fixed cases, to pin the precedence chain and
//! the variadic environment projection as properties, not just examples.

use invowk_model::{ArgDef, Command, Implementation, Platform, RuntimeMode};
use invowk_resolver::{build, resolve, BuildOptions};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn runtime_mode_strategy() -> impl Strategy<Value = RuntimeMode> {
    prop_oneof![
        Just(RuntimeMode::Native),
        Just(RuntimeMode::Virtual),
        Just(RuntimeMode::Container),
    ]
}

fn platform_strategy() -> impl Strategy<Value = Platform> {
    prop_oneof![Just(Platform::Linux), Just(Platform::Mac), Just(Platform::Windows)]
}

/// A non-empty, duplicate-free list of runtimes, in the order the command
/// would declare them (first == command-level default for the platform).
fn runtime_list_strategy() -> impl Strategy<Value = Vec<RuntimeMode>> {
    prop::collection::vec(runtime_mode_strategy(), 1..=3).prop_map(|modes| {
        let mut seen = Vec::new();
        for mode in modes {
            if !seen.contains(&mode) {
                seen.push(mode);
            }
        }
        seen
    })
}

fn single_impl_command(runtimes: Vec<RuntimeMode>, platform: Platform) -> Command {
    Command {
        name: "build".to_string(),
        description: String::new(),
        implementations: vec![Implementation {
            runtimes,
            platforms: vec![platform],
            script: "echo hi".to_string(),
        }],
        flags: Vec::new(),
        args: Vec::<ArgDef>::new(),
        env: Vec::new(),
        working_dir: None,
        dependencies: Vec::new(),
    }
}

proptest! {
    /// For all (command, override, platform) where override is permitted by
    /// the command on that platform, resolve returns (override, impl) where
    /// impl is exactly command.implementation_for(platform, override).
    #[test]
    fn override_permitted_returns_its_own_implementation(
        runtimes in runtime_list_strategy(),
        platform in platform_strategy(),
        pick_index in 0usize..3,
    ) {
        let command = single_impl_command(runtimes.clone(), platform);
        let chosen = runtimes[pick_index % runtimes.len()];

        let selection = resolve(&command, "build", Some(chosen.as_str()), None, platform).unwrap();

        prop_assert_eq!(selection.runtime, chosen);
        prop_assert_eq!(
            Some(&selection.implementation),
            command.implementation_for(platform, chosen)
        );
    }

    /// For all commands not permitting the override on the platform, resolve
    /// returns RuntimeNotAllowed whose `allowed` equals
    /// command.allowed_runtimes(platform).
    #[test]
    fn override_not_permitted_reports_the_allowed_set(
        runtimes in runtime_list_strategy(),
        platform in platform_strategy(),
        other_platform in platform_strategy(),
    ) {
        prop_assume!(other_platform != platform);
        let command = single_impl_command(runtimes, other_platform);

        // Every RuntimeMode is attempted against a platform the command
        // doesn't support at all, so the override is never permitted.
        for candidate in invowk_model::RuntimeMode::ALL {
            let err = resolve(&command, "build", Some(candidate.as_str()), None, platform).unwrap_err();
            match err {
                invowk_errors::InvowkErrorKind::RuntimeNotAllowed { allowed_runtimes, .. } => {
                    let expected: Vec<String> = command
                        .allowed_runtimes(platform)
                        .iter()
                        .map(RuntimeMode::to_string)
                        .collect();
                    prop_assert_eq!(allowed_runtimes, expected);
                }
                other => prop_assert!(false, "unexpected error variant: {other:?}"),
            }
        }
    }

    /// For all valid positional-arg lists A and a single trailing variadic
    /// arg def, INVOWK_ARG_<NAME>_COUNT == max(0, |A| - k) and the joined
    /// form equals the _j values joined by a single space.
    #[test]
    fn variadic_projection_count_and_join_are_consistent(
        leading in 0usize..4,
        variadic_values in prop::collection::vec("[a-z0-9]{1,6}", 0..6),
    ) {
        let mut args = Vec::new();
        for i in 0..leading {
            args.push(ArgDef {
                name: format!("fixed{i}"),
                required: false,
                variadic: false,
                default: None,
            });
        }
        args.push(ArgDef {
            name: "files".to_string(),
            required: false,
            variadic: true,
            default: None,
        });

        let command = Command {
            name: "pack".to_string(),
            description: String::new(),
            implementations: vec![Implementation {
                runtimes: vec![RuntimeMode::Native],
                platforms: vec![Platform::Linux],
                script: "echo hi".to_string(),
            }],
            flags: Vec::new(),
            args,
            env: Vec::new(),
            working_dir: None,
            dependencies: Vec::new(),
        };

        let mut positional: Vec<String> = (0..leading).map(|i| format!("lead{i}")).collect();
        positional.extend(variadic_values.iter().cloned());

        let selection = resolve(&command, "pack", None, None, Platform::Linux).unwrap();
        let ctx = build(BuildOptions {
            command: Some(&command),
            file: Some("commands.invk"),
            selection,
            positional_args: positional.clone(),
            working_dir: None,
            force_rebuild: false,
            verbose: false,
            runtime_env_files: Vec::new(),
            runtime_env_vars: BTreeMap::new(),
            inherit_mode_override: None,
            inherit_allow_override: Vec::new(),
            inherit_deny_override: Vec::new(),
            flags: BTreeMap::new(),
            source_id: None,
            platform: Platform::Linux,
        })
        .unwrap();

        let env = &ctx.env.extra_env;
        let expected_variadic = &positional[leading.min(positional.len())..];

        let count: usize = env.get("INVOWK_ARG_FILES_COUNT").unwrap().parse().unwrap();
        prop_assert_eq!(count, expected_variadic.len());
        prop_assert_eq!(count, positional.len().saturating_sub(leading));

        let joined = env.get("INVOWK_ARG_FILES").unwrap();
        let rebuilt: Vec<&str> = (1..=expected_variadic.len())
            .map(|j| env.get(&format!("INVOWK_ARG_FILES_{j}")).unwrap().as_str())
            .collect();
        prop_assert_eq!(joined.as_str(), rebuilt.join(" "));
        prop_assert_eq!(rebuilt, expected_variadic.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
