use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const QUIET_DIRECTIVE: &str = "formwire=info";
const VERBOSE_DIRECTIVE: &str = "formwire=debug,info";

/// `RUST_LOG` wins when set; otherwise fall back to the crate's own level.
fn filter_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVE
    } else {
        QUIET_DIRECTIVE
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose)))
}

// Source locations and thread ids are noise for a one-shot CLI.
fn bare_layer() -> fmt::Layer<Registry, DefaultFields, Format> {
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(bare_layer().compact())
        .with(env_filter(verbose))
        .init();
}

/// Machine-readable output for log collectors. Always at the quiet level
/// unless `RUST_LOG` says otherwise.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(bare_layer().json())
        .with(env_filter(false))
        .init();
}
