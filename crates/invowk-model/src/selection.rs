//! RuntimeSelection: the outcome of the runtime-resolution precedence
//! chain. Plain data; the chain itself lives in the resolver crate so that
//! `invowk-model` stays free of decision logic.

use crate::command::Implementation;
use crate::runtime_mode::RuntimeMode;

/// Where a selected runtime came from, in precedence order. Kept for
/// diagnostics (`invowk resolve` prints it) as well as for the resolver's
/// own fallback bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeSource {
    CliOverride,
    ConfigDefault,
    CommandDefault,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSelection {
    pub runtime: RuntimeMode,
    pub source: RuntimeSource,
    pub implementation: Implementation,
}
