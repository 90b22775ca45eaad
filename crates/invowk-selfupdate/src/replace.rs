//! Atomic binary replacement: the `apply()` half of the update flow.
//! Downloads the archive to a temp file next to the running binary,
//! verifies its checksum, extracts the embedded executable, and renames it
//! over the original — the only step that mutates the target.

use crate::archive::extract_binary;
use crate::github::{Asset, GithubClient, Release};
use crate::install_method::InstallMethod;
use crate::platform::{archive_filename, Os};
use invowk_common::{find_checksum, parse_checksum_file, sha256_hex_file};
use invowk_errors::InvowkErrorKind;
use std::fs;
use std::path::Path;

fn find_asset<'a>(release: &'a Release, name: &str) -> Result<&'a Asset, InvowkErrorKind> {
    release
        .assets
        .iter()
        .find(|asset| asset.name == name)
        .ok_or_else(|| InvowkErrorKind::AssetNotFound(name.to_string()))
}

/// Downloads `asset` fully into memory. Archive and checksum assets are
/// both small enough (tens of MiB at most) that streaming into a temp file
/// is only needed for the archive, which is downloaded separately so its
/// temp file lives next to the running binary (see `apply`).
fn download_to_vec(client: &GithubClient, asset: &Asset) -> Result<Vec<u8>, InvowkErrorKind> {
    use std::io::Read;
    let mut response = client.download_asset(asset)?;
    let mut buf = Vec::new();
    response.read_to_end(&mut buf).map_err(InvowkErrorKind::Io)?;
    Ok(buf)
}

pub fn apply(
    client: &GithubClient,
    release: Option<&Release>,
    binary_path: &Path,
    install_method: InstallMethod,
) -> Result<(), InvowkErrorKind> {
    let release = release.ok_or_else(|| InvowkErrorKind::MissingRequiredInput("release".to_string()))?;
    tracing::info!(tag = %release.tag_name, binary = %binary_path.display(), "applying self-update");

    if cfg!(windows) && install_method == InstallMethod::Unknown {
        tracing::warn!("refusing to self-update on windows with an unmanaged install");
        return Err(InvowkErrorKind::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "refusing to self-update on windows with an unmanaged install: the running binary is locked",
        )));
    }

    let archive_name = archive_filename(&release.tag_name);
    let archive_asset = find_asset(release, &archive_name)?;
    let checksums_asset = find_asset(release, "checksums.txt")?;

    tracing::debug!(asset = %checksums_asset.name, "fetching checksums.txt");
    let checksums_bytes = download_to_vec(client, checksums_asset)?;
    let checksums_text = String::from_utf8_lossy(&checksums_bytes);
    let entries = parse_checksum_file(&checksums_text).map_err(|_| InvowkErrorKind::AssetNotFound("checksums.txt".to_string()))?;
    let expected_hash = find_checksum(&entries, &archive_name)
        .ok_or_else(|| InvowkErrorKind::AssetNotFound(archive_name.clone()))?
        .to_string();

    let parent = binary_path
        .parent()
        .ok_or_else(|| InvowkErrorKind::MissingRequiredInput("binary_path parent directory".to_string()))?;

    let archive_temp = parent.join(format!(".invowk-update-{}.tar.gz", std::process::id()));
    tracing::debug!(asset = %archive_asset.name, dest = %archive_temp.display(), "downloading release archive");
    let mut response = client.download_asset(archive_asset)?;
    {
        let mut temp_file = fs::File::create(&archive_temp).map_err(InvowkErrorKind::Io)?;
        std::io::copy(&mut response, &mut temp_file).map_err(InvowkErrorKind::Io)?;
    }

    let actual_hash = match sha256_hex_file(&archive_temp) {
        Ok(hash) => hash,
        Err(err) => {
            let _ = fs::remove_file(&archive_temp);
            return Err(InvowkErrorKind::Io(std::io::Error::other(err.to_string())));
        }
    };

    if actual_hash.to_lowercase() != expected_hash.to_lowercase() {
        tracing::warn!(expected = %expected_hash, got = %actual_hash, "checksum mismatch, leaving original binary untouched");
        let _ = fs::remove_file(&archive_temp);
        return Err(InvowkErrorKind::ChecksumMismatch {
            expected: expected_hash,
            got: actual_hash,
            filename: archive_name,
        });
    }
    tracing::debug!("checksum verified");

    let archive_bytes = match fs::read(&archive_temp) {
        Ok(bytes) => bytes,
        Err(err) => {
            let _ = fs::remove_file(&archive_temp);
            return Err(InvowkErrorKind::Io(err));
        }
    };
    let _ = fs::remove_file(&archive_temp);

    let binary_name = Os::current().binary_name();
    let extracted = extract_binary(&archive_bytes, parent, binary_name)?;

    if let Err(err) = match_mode(&extracted, binary_path) {
        let _ = fs::remove_file(&extracted);
        return Err(err);
    }

    if let Err(err) = fs::rename(&extracted, binary_path) {
        let _ = fs::remove_file(&extracted);
        return Err(InvowkErrorKind::Io(err));
    }

    tracing::info!(tag = %release.tag_name, "self-update applied");
    Ok(())
}

#[cfg(unix)]
fn match_mode(extracted: &Path, original: &Path) -> Result<(), InvowkErrorKind> {
    use std::os::unix::fs::PermissionsExt;
    let mode = fs::metadata(original).map_err(InvowkErrorKind::Io)?.permissions().mode();
    let mut perms = fs::metadata(extracted).map_err(InvowkErrorKind::Io)?.permissions();
    perms.set_mode(mode);
    fs::set_permissions(extracted, perms).map_err(InvowkErrorKind::Io)
}

#[cfg(not(unix))]
fn match_mode(_extracted: &Path, _original: &Path) -> Result<(), InvowkErrorKind> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_release() {
        let client = GithubClient::new("api.github.com", None, "invowk/test");
        let err = apply(&client, None, Path::new("/tmp/invowk"), InstallMethod::Unknown).unwrap_err();
        assert!(matches!(err, InvowkErrorKind::MissingRequiredInput(field) if field == "release"));
    }
}
