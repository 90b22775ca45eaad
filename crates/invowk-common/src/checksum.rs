//! sha256sum-format checksum parsing and streaming verification, tightened
//! to the exact two-space `sha256sum` shape the self-update engine's
//! checksums.txt assets use.

use crate::error::CommonError;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One `<hash>  <filename>` line from a checksums file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumEntry {
    pub hash: String,
    pub filename: String,
}

const STREAM_BUF_SIZE: usize = 64 * 1024;

fn is_hex64(value: &str) -> bool {
    value.len() == 64 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse sha256sum-format text: `<64-hex>␠␠<filename>` per line. Lines that
/// don't match this exact shape (wrong hash length, not exactly two spaces)
/// are silently skipped. Fails if no line parses.
pub fn parse_checksum_file(content: &str) -> Result<Vec<ChecksumEntry>, CommonError> {
    let mut entries = Vec::new();

    for line in content.lines() {
        if line.len() < 67 {
            continue;
        }
        let (hash, tail) = line.split_at(64);
        if !is_hex64(hash) || !tail.starts_with("  ") {
            continue;
        }
        let filename = &tail[2..];
        if filename.is_empty() || filename.starts_with(' ') {
            continue;
        }
        entries.push(ChecksumEntry {
            hash: hash.to_lowercase(),
            filename: filename.to_string(),
        });
    }

    if entries.is_empty() {
        return Err(CommonError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "no checksum entries parsed",
        )));
    }

    Ok(entries)
}

/// Find an entry by exact filename match (case-sensitive on the name,
/// case-folded on the hash when compared elsewhere).
pub fn find_checksum<'a>(entries: &'a [ChecksumEntry], filename: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.filename == filename)
        .map(|entry| entry.hash.as_str())
}

/// Hex-encoded SHA-256 of an in-memory byte slice.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Stream a file through SHA-256 without loading it fully into memory.
pub fn sha256_hex_file(path: &Path) -> Result<String, CommonError> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(STREAM_BUF_SIZE, file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; STREAM_BUF_SIZE];
    loop {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Reformat entries back into sha256sum text. Re-parsing the output of this
/// function yields the same set of entries (the parser round-trips on its
/// own output).
pub fn format_checksum_file(entries: &[ChecksumEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.hash);
        out.push_str("  ");
        out.push_str(&entry.filename);
        out.push('\n');
    }
    out
}
