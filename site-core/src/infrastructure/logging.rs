use tracing_subscriber::{EnvFilter, fmt};

/// JSON logs on stdout. `RUST_LOG` wins over `default_directives`.
pub fn init_logging(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // `try_init` also bridges `log` records, so actix's access log lands here.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .json()
        .try_init();
}
