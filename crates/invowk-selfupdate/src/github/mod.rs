pub mod api;
pub mod client;

pub use api::{Asset, Release};
pub use client::GithubClient;
