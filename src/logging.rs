use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Installs the global subscriber. Logs go to stderr because stdout carries
/// the MCP transport. `RUST_LOG` overrides `level` when set.
pub fn init(level: &str) {
    let default_level = parse_level(level).unwrap_or(LevelFilter::WARN);

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(filter);

    // A subscriber may already be installed (tests, embedding hosts).
    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "off" => Some(LevelFilter::OFF),
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}
