use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set. Kept at `warn` so diagnostics do
/// not interleave with the interactive transcript.
const DEFAULT_FILTER: &str = "warn";

/// Create an environment filter, preferring `RUST_LOG` when it is set.
pub fn create_env_filter() -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(DEFAULT_FILTER)
    }
}

/// Install the global subscriber. Log records go to stderr, next to the
/// transcript.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(create_env_filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        let _ = create_env_filter();
        let _ = EnvFilter::new(DEFAULT_FILTER);
    }
}
