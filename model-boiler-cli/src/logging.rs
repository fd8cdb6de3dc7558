//! Logging setup.
//!
//! Diagnostics go to stderr through `tracing-subscriber` so stdout stays
//! clean for generated code. `RUST_LOG` overrides the default filter.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directives.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "model_boiler=debug,model_boiler_cli=debug,warn"
    } else {
        "warn"
    }
}

/// Install the global subscriber.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
