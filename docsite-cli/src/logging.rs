use tracing_subscriber::EnvFilter;

/// Environment variable that overrides `-v` when set.
pub const LOG_ENV: &str = "DOCSITE_LOG";

/// Map the `-v` count to a tracing directive.
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber, writing to stderr.
///
/// Uses `try_init()` so a second call is a no-op.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(verbosity_to_directive(0), "info");
        assert_eq!(verbosity_to_directive(1), "debug");
        assert_eq!(verbosity_to_directive(2), "trace");
        assert_eq!(verbosity_to_directive(9), "trace");
    }

    #[test]
    fn test_init_twice_is_safe() {
        init_logging(0);
        init_logging(2);
    }
}
