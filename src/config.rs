use clap::Parser;
use std::time::Duration;

/// Fallback used when neither the build nor the runtime environment names a backend.
pub const FALLBACK_API_BASE: &str = "http://localhost:5000";

pub fn default_api_base() -> String {
    option_env!("BOOK_FINDER_API_BASE")
        .unwrap_or(FALLBACK_API_BASE)
        .to_string()
}

#[derive(Debug, Clone, Parser)]
#[command(name = "book-finder", version, about = "Search a book catalog from the terminal")]
pub struct Config {
    /// Base URL of the catalog backend.
    #[arg(long, env = "BOOK_FINDER_API_BASE", default_value_t = default_api_base())]
    pub api_base: String,

    /// Per-request timeout in seconds; unset leaves the HTTP client default.
    #[arg(long, env = "BOOK_FINDER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// tracing filter directive.
    #[arg(long, env = "RUST_LOG", default_value = "book_finder=info")]
    pub log_filter: String,

    /// Search submitted on startup.
    pub query: Vec<String>,
}

impl Config {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn initial_query(&self) -> Option<String> {
        crate::utils::text::normalize_query(&self.query.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "book-finder",
            "--api-base",
            "http://catalog.test",
            "--timeout-secs",
            "5",
            "lord",
            "of",
            "the",
            "rings",
        ])
        .unwrap();

        assert_eq!(config.api_base, "http://catalog.test");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.initial_query().as_deref(), Some("lord of the rings"));
    }

    #[test]
    fn no_positional_query_means_no_startup_search() {
        let config = Config::try_parse_from(["book-finder", "--api-base", "http://x"]).unwrap();
        assert_eq!(config.initial_query(), None);
    }
}
