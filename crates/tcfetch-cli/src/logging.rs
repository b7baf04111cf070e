//! Diagnostic logging setup.
//!
//! Logs go to stderr without timestamps. `--verbose` and `--quiet` pick
//! the level and override `RUST_LOG`; otherwise `RUST_LOG` applies, with
//! `warn` as the fallback.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init(verbose: bool, quiet: bool) {
    let filter = build_filter(verbose, quiet, std::env::var("RUST_LOG").ok().as_deref());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(console::colors_enabled_stderr())
        .with_target(verbose)
        .without_time()
        .try_init();
}

fn build_filter(verbose: bool, quiet: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("warn,tcfetch=debug,tcfetch_core=debug");
    }
    if quiet {
        return EnvFilter::new("error");
    }

    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(rust_log.unwrap_or_default())
}
