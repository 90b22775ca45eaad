//! Shared leaf utilities: checksum parsing/verification and a common error
//! type. No I/O beyond reading the file being hashed; no HTTP, no config.

pub mod checksum;
pub mod error;

pub use checksum::{
    find_checksum, format_checksum_file, parse_checksum_file, sha256_hex, sha256_hex_file,
    ChecksumEntry,
};
pub use error::CommonError;
