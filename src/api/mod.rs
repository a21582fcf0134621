// Gitness API module.
// Provides the client and types for the pull request and registry endpoints.

#![allow(dead_code)]

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitnessClient;
pub use types::*;
