//! Platform-conditional config-directory resolution.
//!
//! Expressed as a pure function of `(platform, getenv, home_dir)` rather
//! than reading the process environment directly, so tests can drive it
//! with fake environments instead of mutating real ones.

use invowk_model::Platform;
use std::path::PathBuf;

/// Resolve the invowk config directory for `platform`, given a `getenv`
/// closure and an optional home directory.
///
/// - linux: `$XDG_CONFIG_HOME/invowk` if set, else `$HOME/.config/invowk`.
/// - mac: `$HOME/Library/Application Support/invowk`.
/// - windows: `$APPDATA/invowk` if set, else `$USERPROFILE/invowk`.
pub fn config_dir_from(
    platform: Platform,
    getenv: impl Fn(&str) -> Option<String>,
    home_dir: Option<&PathBuf>,
) -> Option<PathBuf> {
    match platform {
        Platform::Linux => {
            if let Some(xdg) = getenv("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
                return Some(PathBuf::from(xdg).join("invowk"));
            }
            home_dir.map(|home| home.join(".config").join("invowk"))
        }
        Platform::Mac => home_dir.map(|home| home.join("Library/Application Support/invowk")),
        Platform::Windows => {
            if let Some(appdata) = getenv("APPDATA").filter(|v| !v.is_empty()) {
                return Some(PathBuf::from(appdata).join("invowk"));
            }
            getenv("USERPROFILE")
                .filter(|v| !v.is_empty())
                .map(|profile| PathBuf::from(profile).join("invowk"))
        }
    }
}

/// Resolve for the host platform against the real process environment.
pub fn host_config_dir() -> Option<PathBuf> {
    config_dir_from(
        Platform::current(),
        |name| std::env::var(name).ok(),
        std::env::var("HOME").ok().map(PathBuf::from).as_ref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn linux_prefers_xdg_config_home() {
        let home = PathBuf::from("/home/alice");
        let dir = config_dir_from(
            Platform::Linux,
            env(&[("XDG_CONFIG_HOME", "/custom/config")]),
            Some(&home),
        );
        assert_eq!(dir, Some(PathBuf::from("/custom/config/invowk")));
    }

    #[test]
    fn linux_falls_back_to_home_dot_config() {
        let home = PathBuf::from("/home/alice");
        let dir = config_dir_from(Platform::Linux, env(&[]), Some(&home));
        assert_eq!(dir, Some(PathBuf::from("/home/alice/.config/invowk")));
    }

    #[test]
    fn mac_uses_application_support() {
        let home = PathBuf::from("/Users/alice");
        let dir = config_dir_from(Platform::Mac, env(&[]), Some(&home));
        assert_eq!(
            dir,
            Some(PathBuf::from("/Users/alice/Library/Application Support/invowk"))
        );
    }

    #[test]
    fn windows_prefers_appdata() {
        let dir = config_dir_from(
            Platform::Windows,
            env(&[("APPDATA", r"C:\Users\alice\AppData\Roaming")]),
            None,
        );
        assert_eq!(
            dir,
            Some(PathBuf::from(r"C:\Users\alice\AppData\Roaming\invowk"))
        );
    }

    #[test]
    fn windows_falls_back_to_userprofile() {
        let dir = config_dir_from(
            Platform::Windows,
            env(&[("USERPROFILE", r"C:\Users\alice")]),
            None,
        );
        assert_eq!(dir, Some(PathBuf::from(r"C:\Users\alice\invowk")));
    }

    #[test]
    fn windows_with_no_env_is_none() {
        let dir = config_dir_from(Platform::Windows, env(&[]), None);
        assert_eq!(dir, None);
    }
}
