//! Host OS/arch tags used to build the expected release-asset filename
//! (`invowk_<tag-stripped-v>_<os>_<arch>.tar.gz`).
//!
//! A closed set with an `Unknown` fallback for hosts outside the release
//! matrix; the asset filename is a fixed template, so only `as_str()` is
//! needed to build it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    MacOs,
    Windows,
}

impl Os {
    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::MacOs => "darwin",
            Os::Windows => "windows",
        }
    }

    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => Os::MacOs,
            "windows" => Os::Windows,
            _ => Os::Linux,
        }
    }

    pub fn binary_name(&self) -> &'static str {
        match self {
            Os::Windows => "invowk.exe",
            _ => "invowk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86_64,
    Aarch64,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
        }
    }

    pub fn current() -> Self {
        match std::env::consts::ARCH {
            "aarch64" => Arch::Aarch64,
            _ => Arch::X86_64,
        }
    }
}

/// Expected archive filename for `tag` (a release tag such as `v1.2.3`) on
/// the running platform.
pub fn archive_filename(tag: &str) -> String {
    let version = tag.strip_prefix('v').unwrap_or(tag);
    format!(
        "invowk_{version}_{}_{}.tar.gz",
        Os::current().as_str(),
        Arch::current().as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_filename_strips_leading_v() {
        let name = archive_filename("v1.2.3");
        assert!(name.starts_with("invowk_1.2.3_"));
        assert!(name.ends_with(".tar.gz"));
    }
}
