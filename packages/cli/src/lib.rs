// ABOUTME: Library half of the oncall-settings command line tool
// ABOUTME: Application wiring, command handlers, and terminal rendering

pub mod commands;
pub mod context;
pub mod output;

pub use context::AppContext;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise warnings only, or info with `verbose`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "info" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
