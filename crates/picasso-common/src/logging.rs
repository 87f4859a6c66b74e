//! Tracing subscriber bootstrap for host applications.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "picasso=info";

/// Install a fmt subscriber filtered by `RUST_LOG` plus `directive`.
///
/// Falls back to [`DEFAULT_DIRECTIVE`] when `directive` does not parse.
/// Safe to call more than once; later calls are ignored.
pub fn init(directive: Option<&str>) {
    let directive = directive.unwrap_or(DEFAULT_DIRECTIVE);
    let filter = match directive.parse() {
        Ok(d) => EnvFilter::from_default_env().add_directive(d),
        Err(_) => EnvFilter::from_default_env().add_directive(
            DEFAULT_DIRECTIVE
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
        ),
    };

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
