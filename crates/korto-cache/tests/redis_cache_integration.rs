use std::time::Duration;

use korto_cache::{RedisUrlCache, UrlCache};
use korto_core::ShortCode;
use korto_test_infra::redis::RedisServer;
use redis::AsyncCommands;

struct Fixture {
    _redis: RedisServer,
    redis_url: String,
}

impl Fixture {
    async fn start() -> Self {
        let redis = RedisServer::new().await.expect("start redis");
        let redis_url = redis.redis_url().await.expect("redis url");

        tokio::time::sleep(Duration::from_millis(500)).await;

        Self {
            _redis: redis,
            redis_url,
        }
    }

    async fn cache(&self) -> RedisUrlCache {
        RedisUrlCache::connect(&self.redis_url)
            .await
            .expect("connect redis cache")
    }

    async fn connection(&self) -> redis::aio::MultiplexedConnection {
        redis::Client::open(self.redis_url.as_str())
            .expect("redis client")
            .get_multiplexed_async_connection()
            .await
            .expect("redis connection")
    }
}

fn code(value: &str) -> ShortCode {
    ShortCode::new_unchecked(value)
}

#[tokio::test]
async fn absent_key_is_none() {
    let fixture = Fixture::start().await;
    let cache = fixture.cache().await;

    let result = cache.get_url(&code("AAAAAAAAAAA")).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn set_then_get_returns_url() {
    let fixture = Fixture::start().await;
    let cache = fixture.cache().await;
    let c = code("vNnegmwpMBk");

    cache.set_url(&c, "www.google.com").await.unwrap();

    let result = cache.get_url(&c).await.unwrap();
    assert_eq!(result.as_deref(), Some("www.google.com"));
}

#[tokio::test]
async fn set_url_overwrites() {
    let fixture = Fixture::start().await;
    let cache = fixture.cache().await;
    let c = code("vNnegmwpMBk");

    cache.set_url(&c, "v1").await.unwrap();
    cache.set_url(&c, "v2").await.unwrap();

    assert_eq!(cache.get_url(&c).await.unwrap().as_deref(), Some("v2"));
}

#[tokio::test]
async fn set_url_if_absent_keeps_existing_value() {
    let fixture = Fixture::start().await;
    let cache = fixture.cache().await;
    let c = code("kkkkkkkkkkk");

    assert!(cache.set_url_if_absent(&c, "v1").await.unwrap());
    assert!(!cache.set_url_if_absent(&c, "v2").await.unwrap());

    assert_eq!(cache.get_url(&c).await.unwrap().as_deref(), Some("v1"));
}

#[tokio::test]
async fn empty_value_is_present_and_replaceable() {
    let fixture = Fixture::start().await;
    let cache = fixture.cache().await;
    let c = code("kkkkkkkkkkk");

    cache.set_url(&c, "").await.unwrap();
    assert_eq!(cache.get_url(&c).await.unwrap().as_deref(), Some(""));

    assert!(cache.set_url_if_absent(&c, "v1").await.unwrap());
    assert_eq!(cache.get_url(&c).await.unwrap().as_deref(), Some("v1"));
}

#[tokio::test]
async fn values_are_stored_under_the_key_prefix() {
    let fixture = Fixture::start().await;
    let cache = fixture.cache().await;
    let mut conn = fixture.connection().await;

    cache
        .set_url(&code("vNnegmwpMBk"), "www.google.com")
        .await
        .unwrap();

    let raw: Option<String> = conn.get("korto:url:vNnegmwpMBk").await.unwrap();
    assert_eq!(raw.as_deref(), Some("www.google.com"));
}

#[tokio::test]
async fn prefixes_isolate_caches() {
    let fixture = Fixture::start().await;
    let a = RedisUrlCache::with_prefix(fixture.connection().await, "a:");
    let b = RedisUrlCache::with_prefix(fixture.connection().await, "b:");
    let c = code("vNnegmwpMBk");

    a.set_url(&c, "www.google.com").await.unwrap();

    assert!(b.get_url(&c).await.unwrap().is_none());
    assert_eq!(a.get_url(&c).await.unwrap().as_deref(), Some("www.google.com"));
}

#[tokio::test]
async fn connect_rejects_invalid_url() {
    let err = RedisUrlCache::connect("not a redis url").await.unwrap_err();
    assert!(matches!(err, korto_core::CacheError::Initialization(_)));
}
