use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when it is set and valid; otherwise `configured_level`
/// from the `[logging]` section applies.
pub fn init(configured_level: &str) {
    // try_init: a second call (tests, both binaries in one process) is a no-op
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(configured_level))
        .with_target(false)
        .try_init();
}

/// Filter used by `init`.
pub fn filter(configured_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(configured_level)))
}

/// Normalizes a configured level name. Unknown names fall back to `info`.
pub fn level_directive(level: &str) -> &'static str {
    match level.trim().to_lowercase().as_str() {
        "error" => "error",
        "warn" | "warning" => "warn",
        "debug" => "debug",
        "trace" => "trace",
        "off" => "off",
        _ => "info",
    }
}
