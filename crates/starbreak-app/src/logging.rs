//! Log output for the runner.
//!
//! Logs go to stderr so stdout stays free for snapshot lines. `RUST_LOG`
//! wins when set. Otherwise `DEBUG_LOGGING=1` turns on debug output for the
//! starbreak crates and everything else stays at INFO.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const DEBUG_DIRECTIVE: &str = concat!(
    "info,starbreak=debug,starbreak_app=debug,starbreak_core=debug,",
    "starbreak_patterns=debug,starbreak_sim=debug"
);

/// Filter directive used when `RUST_LOG` is absent.
pub fn default_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        DEBUG_DIRECTIVE
    } else {
        "info"
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug_logging)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    if tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .try_init()
        .is_ok()
    {
        tracing::info!(debug_logging, "STARBREAK logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "info");
        let debug = default_directive(true);
        assert!(debug.starts_with("info,"));
        assert!(debug.contains("starbreak_sim=debug"));
        assert!(EnvFilter::try_new(debug).is_ok());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init();
        init();
    }
}
