//! `ActionableError`: wraps an `InvowkErrorKind` with the operation/resource
//! context and remediation suggestions the CLI surface prints.

use crate::kind::InvowkErrorKind;
use std::error::Error as StdError;
use std::fmt;

pub struct ActionableError {
    operation: String,
    resource: Option<String>,
    suggestions: Vec<String>,
    cause: InvowkErrorKind,
}

impl ActionableError {
    pub fn builder(operation: impl Into<String>, cause: InvowkErrorKind) -> ActionableErrorBuilder {
        ActionableErrorBuilder {
            operation: operation.into(),
            resource: None,
            suggestions: Vec::new(),
            cause,
        }
    }

    /// Programmatic cause inspection.
    pub fn unwrap(&self) -> &InvowkErrorKind {
        &self.cause
    }

    /// `"failed to {operation}[: {resource}][: {cause}]"`.
    pub fn error_text(&self) -> String {
        let mut out = format!("failed to {}", self.operation);
        if let Some(resource) = &self.resource {
            out.push_str(": ");
            out.push_str(resource);
        }
        out.push_str(": ");
        out.push_str(&self.cause.to_string());
        out
    }

    /// Non-verbose: `error_text()` plus a bulleted suggestion list. Verbose
    /// additionally appends a numbered causal chain walked via `source()`.
    pub fn format(&self, verbose: bool) -> String {
        let mut out = self.error_text();
        for suggestion in &self.suggestions {
            out.push_str("\n  - ");
            out.push_str(suggestion);
        }
        if verbose {
            if let Some(first) = self.cause.source() {
                out.push_str("\n\ncaused by:");
                let mut index = 1;
                let mut current: Option<&(dyn StdError + 'static)> = Some(first);
                while let Some(err) = current {
                    out.push_str(&format!("\n  {}. {}", index, err));
                    current = err.source();
                    index += 1;
                }
            }
        }
        out
    }
}

impl fmt::Debug for ActionableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionableError")
            .field("operation", &self.operation)
            .field("resource", &self.resource)
            .field("suggestions", &self.suggestions)
            .field("cause", &self.cause.to_string())
            .finish()
    }
}

impl fmt::Display for ActionableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error_text())
    }
}

impl StdError for ActionableError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.cause)
    }
}

pub struct ActionableErrorBuilder {
    operation: String,
    resource: Option<String>,
    suggestions: Vec<String>,
    cause: InvowkErrorKind,
}

impl ActionableErrorBuilder {
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn build(self) -> ActionableError {
        ActionableError {
            operation: self.operation,
            resource: self.resource,
            suggestions: self.suggestions,
            cause: self.cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_text_without_resource() {
        let err = ActionableError::builder("resolve command", InvowkErrorKind::UserCancelled).build();
        assert_eq!(err.error_text(), "failed to resolve command: operation cancelled by user");
    }

    #[test]
    fn error_text_with_resource() {
        let err = ActionableError::builder(
            "check release",
            InvowkErrorKind::ReleaseNotFound("v1.2.3".to_string()),
        )
        .resource("github.com/acme/invowk")
        .build();
        assert_eq!(
            err.error_text(),
            "failed to check release: github.com/acme/invowk: release not found: v1.2.3"
        );
    }

    #[test]
    fn terse_format_still_lists_suggestions() {
        let err = ActionableError::builder(
            "verify checksum",
            InvowkErrorKind::ChecksumMismatch {
                expected: "aa".to_string(),
                got: "bb".to_string(),
                filename: "invowk-linux-x86_64".to_string(),
            },
        )
        .suggest("re-download the release asset")
        .suggest("check for a corrupted local cache")
        .build();

        let terse = err.format(false);
        let verbose = err.format(true);
        assert!(terse.contains("re-download the release asset"));
        assert!(terse.contains("check for a corrupted local cache"));
        assert!(!terse.contains("caused by:"));
        assert!(!verbose.contains("caused by:"));
    }

    #[test]
    fn verbose_format_unwinds_causal_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "checksums.txt missing");
        let err = ActionableError::builder("apply update", InvowkErrorKind::Io(io_err)).build();

        assert!(!err.format(false).contains("caused by:"));
        assert!(err.format(true).contains("caused by:"));
        assert!(err.format(true).contains("checksums.txt missing"));
    }
}
