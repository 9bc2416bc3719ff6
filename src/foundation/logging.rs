use tracing_subscriber::EnvFilter;

/// Map a configured level name (`DEBUG`, `INFO`, `WARNING`, `ERROR`) onto a tracing directive.
///
/// Returns `None` for names that are not recognised so the caller can fall back and say so.
pub fn level_directive(level: &str) -> Option<&'static str> {
    match level.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Some("trace"),
        "DEBUG" => Some("debug"),
        "INFO" => Some("info"),
        "WARN" | "WARNING" => Some("warn"),
        "ERROR" | "CRITICAL" => Some("error"),
        _ => None,
    }
}

/// Install the global `fmt` subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to every target.
pub fn init_tracing(level: &str) {
    let directive = level_directive(level);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive.unwrap_or("info")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    if directive.is_none() {
        tracing::warn!(level, "invalid log level; using INFO");
    }
}
