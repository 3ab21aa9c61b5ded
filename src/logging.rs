use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr so JSON written to
/// stdout stays clean.
///
/// With `debug` set the level is `debug` and `RUST_LOG` may override it;
/// otherwise the level is pinned to `info`.
pub fn init(debug: bool) {
    // Without `debug` the level stays at `info` even if `RUST_LOG` is set, so a
    // stray variable in the user's environment cannot turn on verbose output.
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
