//! Tar.gz extraction of the embedded executable.
//!
//! Unpacks everything, then picks the expected binary by basename, with a
//! hard size cap on the copy so a malicious/corrupt archive can't exhaust
//! memory or disk (decompression-bomb guard, 500 MiB limit).

use flate2::read::GzDecoder;
use invowk_errors::InvowkErrorKind;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tar::Archive;

const MAX_EXTRACTED_BYTES: u64 = 500 * 1024 * 1024;

/// Extracts the archive into `dest_dir` and returns the path to the file
/// whose basename matches `binary_name`, working for both flat and
/// directory-wrapped archive layouts.
pub fn extract_binary(
    archive_bytes: &[u8],
    dest_dir: &Path,
    binary_name: &str,
) -> Result<PathBuf, InvowkErrorKind> {
    let decoder = GzDecoder::new(archive_bytes);
    let mut archive = Archive::new(decoder);

    let mut matches = Vec::new();
    for entry in archive.entries().map_err(InvowkErrorKind::Io)? {
        let mut entry = entry.map_err(InvowkErrorKind::Io)?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let entry_path = entry.path().map_err(InvowkErrorKind::Io)?.to_path_buf();
        let is_match = entry_path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name == binary_name)
            .unwrap_or(false);
        if !is_match {
            continue;
        }

        let out_path = dest_dir.join(format!(".invowk-extract-{}", matches.len()));
        let mut out_file = File::create(&out_path).map_err(InvowkErrorKind::Io)?;
        copy_capped(&mut entry, &mut out_file, MAX_EXTRACTED_BYTES)?;
        matches.push(out_path);
    }

    match matches.len() {
        1 => Ok(matches.into_iter().next().unwrap()),
        0 => Err(InvowkErrorKind::AssetNotFound(binary_name.to_string())),
        // First basename match wins when an archive wraps the binary in a
        // directory and somehow yields more than one candidate; drop the rest.
        _ => {
            for extra in matches.iter().skip(1) {
                let _ = std::fs::remove_file(extra);
            }
            Ok(matches.into_iter().next().unwrap())
        }
    }
}

fn copy_capped<R: Read, W: Write>(reader: &mut R, writer: &mut W, cap: u64) -> Result<(), InvowkErrorKind> {
    let mut limited = reader.take(cap + 1);
    let mut buf = [0u8; 64 * 1024];
    let mut total: u64 = 0;
    loop {
        let read = limited.read(&mut buf).map_err(InvowkErrorKind::Io)?;
        if read == 0 {
            break;
        }
        total += read as u64;
        if total > cap {
            return Err(InvowkErrorKind::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("extracted file exceeds {cap} byte limit"),
            )));
        }
        writer.write_all(&buf[..read]).map_err(InvowkErrorKind::Io)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn build_tar_gz(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (name, data) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder.append_data(&mut header, name, *data).unwrap();
        }
        let tar_bytes = builder.into_inner().unwrap();

        let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&tar_bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn extracts_flat_layout() {
        let dir = tempfile::tempdir().unwrap();
        let archive = build_tar_gz(&[("invowk", b"binary-bytes")]);
        let path = extract_binary(&archive, dir.path(), "invowk").unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"binary-bytes");
    }

    #[test]
    fn extracts_directory_wrapped_layout_by_basename() {
        let dir = tempfile::tempdir().unwrap();
        let archive = build_tar_gz(&[("invowk-1.2.3/invowk", b"binary-bytes")]);
        let path = extract_binary(&archive, dir.path(), "invowk").unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"binary-bytes");
    }

    #[test]
    fn missing_binary_is_asset_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let archive = build_tar_gz(&[("README.md", b"hello")]);
        assert!(matches!(
            extract_binary(&archive, dir.path(), "invowk"),
            Err(InvowkErrorKind::AssetNotFound(_))
        ));
    }
}
