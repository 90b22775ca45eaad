//! `UpgradeCheck` and the `check()` half of the update flow.

use crate::github::{GithubClient, Release};
use crate::install_method::{self, InstallMethod};
use invowk_errors::InvowkErrorKind;
use semver::Version;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct UpgradeCheck {
    pub current_version: String,
    pub latest_version: String,
    pub target_release: Option<Release>,
    pub install_method: InstallMethod,
    pub upgrade_available: bool,
    pub message: String,
}

/// Ensures a leading `v` and parses the remainder as semver; used both for
/// user-supplied target versions and for comparing release tags.
fn normalize_and_parse(raw: &str) -> Result<(String, Version), InvowkErrorKind> {
    let normalized = if raw.starts_with('v') {
        raw.to_string()
    } else {
        format!("v{raw}")
    };
    let version = Version::parse(normalized.trim_start_matches('v'))
        .map_err(|_| InvowkErrorKind::InvalidVersion(raw.to_string()))?;
    Ok((normalized, version))
}

pub struct CheckOptions<'a> {
    pub repo: &'a str,
    pub current_version: &'a str,
    pub target_version: Option<&'a str>,
    pub binary_path: &'a Path,
    pub build_time_hint: Option<&'a str>,
    pub gopath: Option<&'a Path>,
    pub declared_module_path: Option<&'a str>,
}

pub fn check(client: &GithubClient, options: CheckOptions<'_>) -> Result<UpgradeCheck, InvowkErrorKind> {
    let install_method = install_method::detect(
        options.binary_path,
        options.build_time_hint,
        options.gopath,
        options.declared_module_path,
    );

    if matches!(install_method, InstallMethod::Homebrew | InstallMethod::GoInstall) {
        let manager = if install_method == InstallMethod::Homebrew {
            "brew upgrade"
        } else {
            "go install"
        };
        return Ok(UpgradeCheck {
            current_version: options.current_version.to_string(),
            latest_version: options.current_version.to_string(),
            target_release: None,
            install_method,
            upgrade_available: false,
            message: format!("installed via {}; upgrade with `{manager}`", install_method.as_str()),
        });
    }

    let target_release = match options.target_version {
        Some(raw) => {
            tracing::debug!(repo = options.repo, target = raw, "looking up exact release by tag");
            let (tag, _) = normalize_and_parse(raw)?;
            client.get_release_by_tag(options.repo, &tag)?
        }
        None => {
            tracing::debug!(repo = options.repo, "listing releases to find the latest stable");
            let releases = client.list_releases(options.repo)?;
            releases
                .into_iter()
                .next()
                .ok_or_else(|| InvowkErrorKind::ReleaseNotFound(options.repo.to_string()))?
        }
    };

    let (_, target) = normalize_and_parse(&target_release.tag_name)?;
    let (_, current) = normalize_and_parse(options.current_version)?;

    let upgrade_available;
    let message;

    if !current.pre.is_empty() && current.major == target.major && current.minor == target.minor && current.patch == target.patch {
        upgrade_available = false;
        message = "running a pre-release at or ahead of the latest stable release".to_string();
    } else if !current.pre.is_empty() && current >= strip_pre(&target) {
        upgrade_available = false;
        message = "running a pre-release ahead of the latest stable release".to_string();
    } else if current >= target {
        upgrade_available = false;
        message = "already up to date".to_string();
    } else {
        upgrade_available = true;
        message = format!("upgrade available: {} -> {}", current, target);
    }
    tracing::info!(current = %current, target = %target, upgrade_available, "update check complete");

    Ok(UpgradeCheck {
        current_version: options.current_version.to_string(),
        latest_version: target_release.tag_name.clone(),
        target_release: Some(target_release),
        install_method,
        upgrade_available,
        message,
    })
}

fn strip_pre(version: &Version) -> Version {
    Version::new(version.major, version.minor, version.patch)
}
