//! Self-update engine: install-method detection, a GitHub Releases client,
//! checksum verification (reused from `invowk-common`), and atomic binary
//! replacement.

pub mod archive;
pub mod github;
pub mod install_method;
pub mod platform;
pub mod replace;
pub mod version;

pub use github::GithubClient;
pub use install_method::InstallMethod;
pub use replace::apply;
pub use version::{check, CheckOptions, UpgradeCheck};
