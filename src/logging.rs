use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. Log lines go to stderr so they never
/// interleave with REPL output on stdout. Safe to call more than once.
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
