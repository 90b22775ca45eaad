//! Closed error taxonomy plus an `ActionableError` wrapper that carries
//! operation/resource context and remediation suggestions for the CLI
//! surface.

pub mod actionable;
pub mod kind;

pub use actionable::{ActionableError, ActionableErrorBuilder};
pub use kind::InvowkErrorKind;
