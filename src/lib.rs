//! pr-agent: MCP server that summarizes pending git changes and recommends
//! PR description templates (library crate).
//!
//! Re-exports public modules for the binary and integration tests.

pub mod config;
pub mod constants;
pub mod env;
pub mod git;
pub mod inspect;
pub mod logging;
pub mod models;
pub mod server;
pub mod templates;
pub mod workspace;
