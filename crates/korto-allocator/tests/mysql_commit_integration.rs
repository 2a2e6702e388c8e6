use std::collections::HashSet;
use std::time::Duration;

use korto_allocator::{AllocatorConfig, Commit, Committer};
use korto_core::{ReadRepository, Repository, ShortCode, ShortUrlRecord};
use korto_storage::MySqlRepository;
use korto_test_infra::mysql::{MySqlConfig, MySqlServer};

struct Fixture {
    _mysql: MySqlServer,
    committer: Committer<MySqlRepository>,
}

impl Fixture {
    async fn start() -> Self {
        let mysql = MySqlServer::new(MySqlConfig::builder().build())
            .await
            .expect("start mysql");
        let url = mysql.database_url().await.expect("mysql url");
        let repo = connect_with_retry(&url).await;
        repo.ensure_schema().await.expect("create schema");

        Self {
            _mysql: mysql,
            committer: Committer::new(repo, AllocatorConfig::default()),
        }
    }
}

async fn connect_with_retry(url: &str) -> MySqlRepository {
    let mut last_error = None;

    for _ in 0..20 {
        match MySqlRepository::connect(url).await {
            Ok(repo) => return repo,
            Err(err) => {
                last_error = Some(err);
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }

    panic!("failed to connect mysql: {last_error:?}");
}

#[tokio::test]
async fn commit_issues_google_code_and_reuses_it() {
    let fixture = Fixture::start().await;

    let first = fixture.committer.commit("www.google.com").await.unwrap();
    assert_eq!(
        first,
        Commit::Committed(ShortCode::new_unchecked("vNnegmwpMBk"))
    );

    let second = fixture.committer.commit("www.google.com").await.unwrap();
    assert!(matches!(second, Commit::Existing(ref r) if r.long_url == "www.google.com"));
    assert_eq!(second.code().as_str(), "vNnegmwpMBk");
}

#[tokio::test]
async fn collision_moves_to_next_probe() {
    let fixture = Fixture::start().await;
    fixture
        .committer
        .repository()
        .insert(&ShortUrlRecord::new(
            ShortCode::new_unchecked("vNnegmwpMBk"),
            "www.google.test.com",
        ))
        .await
        .unwrap();

    let commit = fixture.committer.commit("www.google.com").await.unwrap();
    assert_eq!(commit.code().as_str(), "vNnegmwpMBo");

    let occupant = fixture
        .committer
        .repository()
        .get(&ShortCode::new_unchecked("vNnegmwpMBk"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(occupant.long_url, "www.google.test.com");
}

#[tokio::test]
async fn concurrent_commits_of_one_url_agree_on_a_code() {
    let fixture = Fixture::start().await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let committer = fixture.committer.clone();
            tokio::spawn(async move { committer.commit("www.google.com").await })
        })
        .collect();

    let mut codes = HashSet::new();
    let mut committed = 0;
    for handle in handles {
        let commit = handle.await.unwrap().unwrap();
        if matches!(commit, Commit::Committed(_)) {
            committed += 1;
        }
        codes.insert(commit.code().clone());
    }

    assert_eq!(committed, 1);
    assert_eq!(codes.len(), 1);
}
