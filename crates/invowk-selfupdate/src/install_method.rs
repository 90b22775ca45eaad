//! Install-method detection: is the running binary managed by a package
//! manager that should own its own upgrades, or can this engine safely
//! replace it in place?

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMethod {
    Unknown,
    Script,
    Homebrew,
    GoInstall,
}

impl InstallMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallMethod::Unknown => "unknown",
            InstallMethod::Script => "script",
            InstallMethod::Homebrew => "homebrew",
            InstallMethod::GoInstall => "go-install",
        }
    }

    fn from_hint(hint: &str) -> Option<Self> {
        match hint.to_lowercase().as_str() {
            "script" => Some(InstallMethod::Script),
            "homebrew" => Some(InstallMethod::Homebrew),
            "go-install" | "goinstall" => Some(InstallMethod::GoInstall),
            "unknown" => Some(InstallMethod::Unknown),
            _ => None,
        }
    }
}

const HOMEBREW_PREFIXES: &[&str] = &[
    "/opt/homebrew/",
    "/usr/local/Cellar/",
    "/home/linuxbrew/.linuxbrew/",
];

/// `module_path` is the compiled-in expected Go module path (e.g.
/// `github.com/acme/invowk`); it is only consulted when the binary lives
/// under `$GOPATH/bin`, matching the compound condition required to avoid
/// false positives for binaries manually placed in `GOPATH/bin`.
pub fn detect(
    binary_path: &Path,
    build_time_hint: Option<&str>,
    gopath: Option<&Path>,
    declared_module_path: Option<&str>,
) -> InstallMethod {
    if let Some(hint) = build_time_hint.and_then(InstallMethod::from_hint) {
        tracing::debug!(?hint, "install method resolved from build-time hint");
        return hint;
    }

    let path_str = binary_path.to_string_lossy();

    if HOMEBREW_PREFIXES.iter().any(|prefix| path_str.contains(prefix)) {
        tracing::debug!(path = %path_str, "install method detected as homebrew by path prefix");
        return InstallMethod::Homebrew;
    }

    if let (Some(gopath), Some(module_path)) = (gopath, declared_module_path) {
        let gopath_bin = gopath.join("bin");
        if binary_path.starts_with(&gopath_bin) && !module_path.is_empty() {
            tracing::debug!(module_path, "install method detected as go-install");
            return InstallMethod::GoInstall;
        }
    }

    if path_str.contains("/.local/bin/") {
        tracing::debug!(path = %path_str, "install method detected as script");
        return InstallMethod::Script;
    }

    tracing::debug!(path = %path_str, "install method could not be determined");
    InstallMethod::Unknown
}
