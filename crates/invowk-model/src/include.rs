//! IncludeEntry and include-set uniqueness validation.
//!
//! Normalization is `Path`-clean only; no case-folding is applied, even on
//! case-insensitive filesystems. A module at `/mods/Foo.invkmod` and
//! `/mods/foo.invkmod` are therefore treated as distinct for uniqueness
//! purposes, so a case-only rename is never silently merged with the file
//! it was renamed from.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeEntry {
    pub absolute_path: PathBuf,
    pub alias: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IncludeValidationError {
    #[error("include path does not end in .invkmod: {0}")]
    NotAModule(PathBuf),
    #[error("duplicate module alias: '{0}'")]
    DuplicateAlias(String),
    #[error("duplicate module path: {0}")]
    DuplicatePath(PathBuf),
}

fn normalize(path: &Path) -> PathBuf {
    // Lexical clean: collapse `.` and resolve `..` without touching the
    // filesystem (entries are already absolute by the time they reach here).
    let mut out = PathBuf::new();
    for component in path.components() {
        use std::path::Component;
        match component {
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir => {}
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Validate global alias- and path-uniqueness across an include set.
pub fn validate_includes(entries: &[IncludeEntry]) -> Result<(), IncludeValidationError> {
    let mut seen_aliases: HashSet<String> = HashSet::new();
    let mut seen_paths: HashSet<PathBuf> = HashSet::new();

    for entry in entries {
        if entry
            .absolute_path
            .extension()
            .map(|ext| ext != "invkmod")
            .unwrap_or(true)
        {
            return Err(IncludeValidationError::NotAModule(entry.absolute_path.clone()));
        }

        if let Some(alias) = &entry.alias {
            if !seen_aliases.insert(alias.clone()) {
                return Err(IncludeValidationError::DuplicateAlias(alias.clone()));
            }
        }

        let normalized = normalize(&entry.absolute_path);
        if !seen_paths.insert(normalized.clone()) {
            return Err(IncludeValidationError::DuplicatePath(normalized));
        }
    }

    Ok(())
}
