//! Shared plumbing for the essay correction workspace: configuration,
//! logging setup and filesystem helpers.

pub mod config;
pub mod logging;
pub mod paths;
