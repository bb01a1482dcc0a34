//! Logging setup shared by the server and the CLI.
//!
//! The server logs pretty, located events in development and flattened JSON in
//! production. The CLI always logs compactly to stderr so its stdout stays a
//! clean JSON document.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Filter used when `RUST_LOG` is unset
fn default_filter(env: &Environment) -> EnvFilter {
    let directives = if env.is_development() {
        "debug,bp_store=debug,bp_select=debug,tower_http=debug"
    } else {
        "info,bp_store=info,bp_select=info,tower_http=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// Initialize server logging for the given environment.
///
/// `RUST_LOG` overrides the default level (e.g. `RUST_LOG=bp_select=trace`).
pub fn init_tracing(env: &Environment) {
    let filter = default_filter(env);

    if env.is_development() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .pretty()
                    .with_filter(filter),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .flatten_event(true)
                    .with_target(true)
                    .with_filter(filter),
            )
            .init();
    }

    tracing::info!(environment = ?env, "Tracing initialized");
}

/// Initialize CLI logging on stderr. `verbose` lowers the default level to debug.
pub fn init_cli_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .init();
}
