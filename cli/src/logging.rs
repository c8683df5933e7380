use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MATHLAB_LOG=mathlab=debug`.
pub const LOG_ENV: &str = "MATHLAB_LOG";

/// Install a stderr subscriber. Defaults to warnings only so the REPL
/// output stays clean.
pub fn init(no_color: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .try_init();
}
