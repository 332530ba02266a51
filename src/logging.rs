use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the stderr subscriber. `level` is either a bare level (`debug`) or a
/// full filter directive (`warn,lox::lexer=trace`); an unparsable value falls back to `warn`.
pub fn init(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed, e.g. when called twice in one process.
    let _ = fmt()
        .compact()
        .without_time()
        .with_target(true)
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}
