//! Boundary helper: wraps a library `InvowkErrorKind` into an
//! `ActionableError` and lifts it into `anyhow::Error` the moment it
//! becomes user-visible. `main` downcasts back to `ActionableError` to
//! render `format(verbose)`; everything else prints as a plain anyhow
//! chain.

use invowk_errors::{ActionableError, InvowkErrorKind};

pub trait ActionableResultExt<T> {
    fn actionable(self, operation: &str) -> anyhow::Result<T>;
    fn actionable_on(self, operation: &str, resource: impl Into<String>) -> anyhow::Result<T>;
}

impl<T> ActionableResultExt<T> for Result<T, InvowkErrorKind> {
    fn actionable(self, operation: &str) -> anyhow::Result<T> {
        self.map_err(|cause| anyhow::Error::new(ActionableError::builder(operation, cause).build()))
    }

    fn actionable_on(self, operation: &str, resource: impl Into<String>) -> anyhow::Result<T> {
        self.map_err(|cause| {
            anyhow::Error::new(
                ActionableError::builder(operation, cause)
                    .resource(resource)
                    .build(),
            )
        })
    }
}
