//! Pure runtime resolution and execution-context construction: takes a
//! command, CLI overrides, and config, and produces the context the
//! execution backend consumes. No host environment reads; platform and
//! config are always passed in by the caller.

mod builder;
mod resolve;

pub use builder::{build, BuildOptions};
pub use resolve::resolve;
