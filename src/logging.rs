use tracing_subscriber::EnvFilter;

/// Initialize logging with tracing_subscriber. `RUST_LOG` overrides the
/// defaults; `verbose` raises this crate to debug.
pub fn init_logging(verbose: bool) {
    let crate_level = if verbose {
        "seo_compete=debug"
    } else {
        "seo_compete=info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn")
            .add_directive("reqwest=warn".parse().unwrap())
            .add_directive(crate_level.parse().unwrap())
    });

    // Logs go to stderr; stdout carries the JSON result.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
