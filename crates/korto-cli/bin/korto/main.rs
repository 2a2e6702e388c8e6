mod cli;

use crate::cli::{CacheBackendArg, Command, LogFormatArg, StorageBackendArg, CLI};
use anyhow::{bail, Context};
use clap::Parser;
use korto_allocator::{Commit, Committer};
use korto_cache::{MokaUrlCache, RedisUrlCache};
use korto_core::{Repository, ShortCode, UrlCache};
use korto_redirector::CachedRepository;
use korto_storage::{InMemoryRepository, MySqlRepository};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    info!(
        storage_backend = %config.storage,
        cache_backend = %config.cache,
        max_probes = config.max_probes,
        commit_attempts = config.commit_attempts,
        "starting korto"
    );

    match config.storage {
        StorageBackendArg::InMemory => {
            with_cache(&config, Arc::new(InMemoryRepository::new())).await
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(mysql_dsn).await?;
            repository.ensure_schema().await?;
            with_cache(&config, Arc::new(repository)).await
        }
    }
}

fn init_tracing(format: LogFormatArg) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr);

    match format {
        LogFormatArg::Text => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }
}

async fn with_cache<R: Repository>(config: &CLI, repository: Arc<R>) -> anyhow::Result<()> {
    match config.cache {
        CacheBackendArg::Moka => run(config, repository, MokaUrlCache::new()).await,
        CacheBackendArg::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("redis url is required when cache backend is redis")?;
            let cache = RedisUrlCache::connect(redis_url).await?;
            run(config, repository, cache).await
        }
    }
}

async fn run<R: Repository, C: UrlCache>(
    config: &CLI,
    repository: Arc<R>,
    cache: C,
) -> anyhow::Result<()> {
    let committer = Committer::from_shared(Arc::clone(&repository), config.allocator_config());
    let cached = CachedRepository::new(repository, cache);

    match &config.command {
        Command::Shorten { url } => {
            let commit = committer.commit(url).await?;
            if let Commit::Committed(code) = &commit {
                if let Err(e) = cached.put_cached(code, url).await {
                    warn!(code = %code, error = %e, "failed to warm cache");
                }
            }

            let code = commit.code();
            match &config.base_url {
                Some(base_url) => println!("{}", code.to_url(base_url)),
                None => println!("{code}"),
            }
        }
        Command::Resolve { code } => {
            let code = ShortCode::new(code.as_str())?;
            match cached.get_long_url(&code).await? {
                Some(long_url) => println!("{long_url}"),
                None => bail!("short code not found: {code}"),
            }
        }
    }

    Ok(())
}
