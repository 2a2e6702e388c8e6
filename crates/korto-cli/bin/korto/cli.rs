use clap::{Parser, Subcommand, ValueEnum};
use korto_allocator::config::{COMMIT_ATTEMPTS, DEFAULT_MAX_PROBES};
use korto_allocator::AllocatorConfig;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const STORAGE_BACKEND_ENV: &str = "KORTO_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "KORTO_MYSQL_DSN";
pub const CACHE_BACKEND_ENV: &str = "KORTO_CACHE_BACKEND";
pub const REDIS_URL_ENV: &str = "KORTO_REDIS_URL";
pub const MAX_PROBES_ENV: &str = "KORTO_MAX_PROBES";
pub const COMMIT_ATTEMPTS_ENV: &str = "KORTO_COMMIT_ATTEMPTS";
pub const STORE_TIMEOUT_MS_ENV: &str = "KORTO_STORE_TIMEOUT_MS";
pub const BASE_URL_ENV: &str = "KORTO_BASE_URL";
pub const LOG_FORMAT_ENV: &str = "KORTO_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheBackendArg {
    #[value(name = "moka")]
    Moka,
    #[value(name = "redis")]
    Redis,
}

impl Display for CacheBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheBackendArg::Moka => write!(f, "moka"),
            CacheBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Allocate (or look up) the short code for a long URL.
    Shorten { url: String },
    /// Print the long URL a short code points to.
    ///
    /// Needs a persistent backend (`--storage mysql` or `--cache redis`):
    /// the in-memory store and cache start empty on every run.
    Resolve { code: String },
}

#[derive(Debug, Parser)]
#[command(name = "korto", about = "Collision-free short codes for long URLs")]
pub struct CLI {
    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    #[arg(
        long,
        env = CACHE_BACKEND_ENV,
        value_enum,
        default_value_t = CacheBackendArg::Moka
    )]
    pub cache: CacheBackendArg,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("cache", "redis"))]
    pub redis_url: Option<String>,

    #[arg(
        long,
        env = MAX_PROBES_ENV,
        default_value_t = DEFAULT_MAX_PROBES,
        value_parser = parse_positive
    )]
    pub max_probes: usize,

    #[arg(
        long,
        env = COMMIT_ATTEMPTS_ENV,
        default_value_t = COMMIT_ATTEMPTS,
        value_parser = parse_positive
    )]
    pub commit_attempts: usize,

    #[arg(long, env = STORE_TIMEOUT_MS_ENV)]
    pub store_timeout_ms: Option<u64>,

    /// Prefix printed in front of new codes, e.g. `https://kor.to`.
    #[arg(long, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Command,
}

fn parse_positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl CLI {
    pub fn allocator_config(&self) -> AllocatorConfig {
        AllocatorConfig {
            max_probes: self.max_probes,
            commit_attempts: self.commit_attempts,
            store_timeout: self.store_timeout_ms.map(Duration::from_millis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        CLI::command().debug_assert();
    }

    #[test]
    fn parses_shorten_with_defaults() {
        let cli = CLI::try_parse_from(["korto", "shorten", "www.google.com"]).unwrap();

        assert_eq!(cli.storage, StorageBackendArg::InMemory);
        assert_eq!(cli.cache, CacheBackendArg::Moka);
        assert!(matches!(cli.command, Command::Shorten { ref url } if url == "www.google.com"));

        let config = cli.allocator_config();
        assert_eq!(config.commit_attempts, COMMIT_ATTEMPTS);
        assert_eq!(config.max_probes, DEFAULT_MAX_PROBES);
        assert_eq!(config.store_timeout, None);
    }

    #[test]
    fn store_timeout_is_in_milliseconds() {
        let cli = CLI::try_parse_from([
            "korto",
            "--store-timeout-ms",
            "250",
            "resolve",
            "vNnegmwpMBk",
        ])
        .unwrap();

        assert_eq!(
            cli.allocator_config().store_timeout,
            Some(Duration::from_millis(250))
        );
    }

    #[test]
    fn zero_commit_attempts_is_rejected() {
        let result =
            CLI::try_parse_from(["korto", "--commit-attempts", "0", "shorten", "www.google.com"]);
        assert!(result.is_err());

        let cli =
            CLI::try_parse_from(["korto", "--commit-attempts", "1", "shorten", "www.google.com"])
                .unwrap();
        assert_eq!(cli.allocator_config().commit_attempts, 1);
    }

    #[test]
    fn zero_max_probes_is_rejected() {
        let result =
            CLI::try_parse_from(["korto", "--max-probes", "0", "shorten", "www.google.com"]);
        assert!(result.is_err());
    }

    #[test]
    fn mysql_backend_requires_dsn() {
        let result =
            CLI::try_parse_from(["korto", "--storage", "mysql", "resolve", "vNnegmwpMBk"]);
        assert!(result.is_err());
    }
}
