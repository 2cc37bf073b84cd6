//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use artic_lib::ArticClient;
use artic_lib::BrowserConfig;
use artic_lib::TransportError;
use artic_lib::config::DEFAULT_MAX_CONCURRENT_FETCHES;
use artic_lib::config::DEFAULT_PAGE_SIZE;
use artic_lib::config::FetchStrategy;
use artic_lib::source::DEFAULT_BASE_URL;
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use clap::ValueEnum;
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(
    name = "artic",
    version,
    about = "Browse the Art Institute of Chicago collection and select artworks across pages"
)]
pub struct Cli {
    /// Collection API base URL.
    #[arg(long = "base-url", env = "ARTIC_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Artworks per page (the API serves at most 100).
    #[arg(
        long = "page-size",
        env = "ARTIC_PAGE_SIZE",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=100)
    )]
    pub page_size: usize,

    /// Refetch pages every time instead of keeping them for the session.
    #[arg(long = "no-cache")]
    pub no_cache: bool,

    /// Fetch the pages needed by `auto` concurrently.
    #[arg(long = "concurrent")]
    pub concurrent: bool,

    /// Most page fetches in flight at once with `--concurrent`.
    #[arg(
        long = "max-concurrent-fetches",
        value_name = "N",
        default_value_t = DEFAULT_MAX_CONCURRENT_FETCHES,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub max_concurrent_fetches: usize,

    /// Request timeout in seconds.
    #[arg(long = "timeout-secs", value_name = "SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log level.
    #[arg(long = "log-level", value_enum, default_value = "info")]
    pub log_level: LogLevelArg,

    /// Log file (default: latest.log in the platform cache directory).
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Off => LevelFilter::Off,
            LogLevelArg::Error => LevelFilter::Error,
            LogLevelArg::Warn => LevelFilter::Warn,
            LogLevelArg::Info => LevelFilter::Info,
            LogLevelArg::Debug => LevelFilter::Debug,
            LogLevelArg::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    pub fn browser_config(&self) -> BrowserConfig {
        let strategy = if self.concurrent {
            FetchStrategy::Concurrent
        } else {
            FetchStrategy::Sequential
        };
        BrowserConfig::new()
            .with_page_size(self.page_size)
            .with_cache_pages(!self.no_cache)
            .with_fetch_strategy(strategy)
            .with_max_concurrent_fetches(self.max_concurrent_fetches)
    }

    pub fn client(&self) -> Result<ArticClient, TransportError> {
        ArticClient::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("artic-cli/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["artic"]).unwrap();
        let config = cli.browser_config();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.cache_pages);
        assert_eq!(config.fetch_strategy, FetchStrategy::Sequential);
        assert_eq!(config.max_concurrent_fetches, DEFAULT_MAX_CONCURRENT_FETCHES);
    }

    #[test]
    fn test_page_size_range() {
        assert!(Cli::try_parse_from(["artic", "--page-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["artic", "--page-size", "101"]).is_err());
        let cli = Cli::try_parse_from(["artic", "--page-size", "100"]).unwrap();
        assert_eq!(cli.page_size, 100);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "artic",
            "--page-size",
            "15",
            "--no-cache",
            "--concurrent",
            "--max-concurrent-fetches",
            "2",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let config = cli.browser_config();
        assert_eq!(config.page_size, 15);
        assert!(!config.cache_pages);
        assert_eq!(config.fetch_strategy, FetchStrategy::Concurrent);
        assert_eq!(config.max_concurrent_fetches, 2);
        assert_eq!(LevelFilter::from(cli.log_level), LevelFilter::Debug);
    }
}
