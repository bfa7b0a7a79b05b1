use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used by both formats when `RUST_LOG` is unset.
/// Issuer calls are logged at debug; surface them with `RUST_LOG=info,common::issuer=debug`.
pub const DEFAULT_DIRECTIVES: &str = "info,tower_http=info,axum=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to [`DEFAULT_DIRECTIVES`]
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output, same filter as the compact format.
pub fn init_logging_json() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_parse_and_keep_issuer_quiet() {
        let filter = EnvFilter::try_new(DEFAULT_DIRECTIVES).unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("tower_http=info"), "{rendered}");
        assert!(!DEFAULT_DIRECTIVES.contains("common::issuer"));
        assert!(EnvFilter::try_new("info,common::issuer=debug").is_ok());
    }
}
