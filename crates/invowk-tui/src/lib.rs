//! TUI sidecar: an authenticated localhost RPC service that lets a
//! command running under a non-native runtime (container/virtual) still
//! drive interactive prompts on the host.

pub mod client;
pub mod protocol;
pub mod server;

pub use client::{TuiClient, ADDR_ENV_VAR, TOKEN_ENV_VAR};
pub use protocol::{
    ChooseRequest, ChooseResult, ComponentTag, ConfirmRequest, ConfirmResult, FileRequest,
    FileResult, FilterRequest, FilterResult, InputRequest, InputResult, PagerRequest,
    PagerResult, Request, Response, SelectedField, SpinRequest, SpinResult, TableRequest,
    TableResult, TextareaRequest, TextareaResult, WriteRequest, WriteResult,
};
pub use server::{QueuedPrompt, ServerError, ServerState, TuiServer};
