//! `tracing` subscriber setup.
//!
//! Everything goes to stderr: in server mode stdout carries the protocol.

use tracing_subscriber::EnvFilter;

use crate::constants::ENV_LOG;
use crate::env::Env;

const DEFAULT_LEVEL: &str = "warn";

/// Filter directive from `PR_AGENT_LOG`, then `RUST_LOG`, then the
/// configured level, then `warn`.
pub fn filter_directive(env: &Env, configured: Option<&str>) -> String {
    env.non_empty(ENV_LOG)
        .or_else(|| env.non_empty("RUST_LOG"))
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(env: &Env, configured: Option<&str>) {
    let directive = filter_directive(env, configured);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
