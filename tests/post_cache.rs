use chrono::DateTime;
use croissant_cache::{
    Author, CacheError, CachedPost, Clip, ClipType, CodecError, ConnectionPool, DatabaseConfig,
    FeedCacheService, Music, PostCacheRepository, Repository, SqliteRepository,
};
use std::sync::Arc;

async fn setup_repository() -> (SqliteRepository, ConnectionPool) {
    let pool = ConnectionPool::from_memory().await.unwrap();
    let repository = SqliteRepository::new(pool.clone());
    repository.initialize().await.unwrap();
    (repository, pool)
}

fn sample_post(post_id: &str, create_time_ms: i64) -> CachedPost {
    CachedPost::new(
        post_id.to_string(),
        format!("Title for {post_id}"),
        format!("Content for {post_id} #feed"),
        Author {
            user_id: format!("author_of_{post_id}"),
            display_name: "Paule".to_string(),
            avatar_url: "https://example.com/avatars/paule.jpg".to_string(),
        },
        DateTime::from_timestamp_millis(create_time_ms).unwrap(),
    )
    .with_hashtags(vec!["feed".to_string()])
    .with_clips(vec![Clip {
        clip_type: ClipType::Image,
        width: 1080,
        height: 1350,
        url: format!("https://example.com/clips/{post_id}.jpg"),
    }])
    .with_music(Music {
        title: "Ovenside".to_string(),
        artist: "The Crumbs".to_string(),
        url: "https://example.com/music/ovenside.mp3".to_string(),
    })
    .with_likes(12, false)
}

#[tokio::test]
async fn round_trip_through_store() {
    let (repository, _pool) = setup_repository().await;

    let with_music = sample_post("post_music", 1_700_000_000_000);
    let mut without_music = sample_post("post_plain", 1_700_000_001_000);
    without_music.music = None;

    repository
        .upsert_many(&[with_music.clone(), without_music.clone()])
        .await
        .unwrap();

    let loaded = repository.find_by_id("post_music").await.unwrap().unwrap();
    assert_eq!(loaded, with_music);

    let loaded = repository.find_by_id("post_plain").await.unwrap().unwrap();
    assert_eq!(loaded, without_music);
    assert!(loaded.music.is_none());
}

#[tokio::test]
async fn find_by_id_absence_is_none_not_an_error() {
    let (repository, _pool) = setup_repository().await;

    let found = repository.find_by_id("nope").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn upsert_overwrites_row_with_same_id() {
    let (repository, _pool) = setup_repository().await;

    let first = sample_post("post_1", 1_000);
    repository.upsert_many(&[first]).await.unwrap();

    let mut second = sample_post("post_1", 2_000);
    second.title = "Edited title".to_string();
    second.like_count = 99;
    repository.upsert_many(&[second.clone()]).await.unwrap();

    let all = repository.get_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], second);
}

#[tokio::test]
async fn later_duplicate_in_one_batch_wins() {
    let (repository, _pool) = setup_repository().await;

    let earlier = sample_post("post_1", 1_000);
    let mut later = sample_post("post_1", 2_000);
    later.content = "The second occurrence".to_string();

    repository
        .upsert_many(&[earlier, later.clone()])
        .await
        .unwrap();

    let all = repository.get_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], later);
}

#[tokio::test]
async fn get_all_orders_by_post_id_descending() {
    let (repository, _pool) = setup_repository().await;

    repository
        .upsert_many(&[
            sample_post("3", 30),
            sample_post("1", 10),
            sample_post("2", 20),
        ])
        .await
        .unwrap();

    let ids: Vec<String> = repository
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|post| post.post_id)
        .collect();
    assert_eq!(ids, vec!["3", "2", "1"]);
}

#[tokio::test]
async fn get_latest_orders_by_create_time_descending() {
    let (repository, _pool) = setup_repository().await;

    repository
        .upsert_many(&[
            sample_post("a", 100),
            sample_post("b", 300),
            sample_post("c", 200),
        ])
        .await
        .unwrap();

    let ids: Vec<String> = repository
        .get_latest(2)
        .await
        .unwrap()
        .into_iter()
        .map(|post| post.post_id)
        .collect();
    assert_eq!(ids, vec!["b", "c"]);
}

#[tokio::test]
async fn delete_all_is_idempotent() {
    let (repository, _pool) = setup_repository().await;

    repository
        .upsert_many(&[sample_post("post_1", 1_000)])
        .await
        .unwrap();

    repository.delete_all().await.unwrap();
    repository.delete_all().await.unwrap();

    assert!(repository.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn replace_all_swaps_entire_contents() {
    let (repository, _pool) = setup_repository().await;

    repository
        .upsert_many(&[sample_post("old_1", 1), sample_post("old_2", 2)])
        .await
        .unwrap();

    let post_a = sample_post("new_a", 10);
    let post_b = sample_post("new_b", 20);
    repository
        .replace_all(&[post_a.clone(), post_b.clone()])
        .await
        .unwrap();

    let found = repository.find_by_id("new_a").await.unwrap().unwrap();
    assert_eq!(found, post_a);
    assert!(repository.find_by_id("old_1").await.unwrap().is_none());

    let latest = repository.get_latest(1).await.unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0], post_b);
}

#[tokio::test]
async fn corrupted_author_blob_fails_get_all_but_not_other_lookups() {
    let (repository, pool) = setup_repository().await;

    let good = sample_post("good_post", 1_000);
    repository.upsert_many(&[good.clone()]).await.unwrap();

    sqlx::query(
        r#"
        INSERT INTO cached_posts (
            post_id, title, content, hashtags_json, create_time,
            author_json, clips_json, music_json, like_count, is_liked
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL, 0, 0)
        "#,
    )
    .bind("bad_post")
    .bind("Broken")
    .bind("Broken row")
    .bind("[]")
    .bind(2_000_i64)
    .bind(r#"{"user_id": "trunc"#)
    .bind("[]")
    .execute(pool.get_pool())
    .await
    .unwrap();

    let err = repository.get_all().await.unwrap_err();
    match err {
        CacheError::Codec(CodecError::MalformedBlob { field, post_id, .. }) => {
            assert_eq!(field, "author");
            assert_eq!(post_id, "bad_post");
        }
        other => panic!("expected a codec error, got {other:?}"),
    }

    // The well-formed row is still readable, and the corrupt row is still
    // in storage rather than silently dropped.
    let found = repository.find_by_id("good_post").await.unwrap().unwrap();
    assert_eq!(found, good);
    assert!(repository.find_by_id("bad_post").await.is_err());
}

#[tokio::test]
async fn replace_all_never_exposes_an_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("croissant_cache.db").display()
    );
    let pool = ConnectionPool::new(&url).await.unwrap();
    let repository = Arc::new(SqliteRepository::new(pool));
    repository.initialize().await.unwrap();

    repository
        .replace_all(&[sample_post("seed_1", 1), sample_post("seed_2", 2)])
        .await
        .unwrap();

    let writer = {
        let repository = Arc::clone(&repository);
        tokio::spawn(async move {
            for round in 0..20_i64 {
                let batch = vec![
                    sample_post(&format!("round_{round}_a"), round * 10),
                    sample_post(&format!("round_{round}_b"), round * 10 + 1),
                ];
                repository.replace_all(&batch).await.unwrap();
            }
        })
    };

    let reader = {
        let repository = Arc::clone(&repository);
        tokio::spawn(async move {
            for _ in 0..50 {
                let posts = repository.get_all().await.unwrap();
                assert!(
                    !posts.is_empty(),
                    "reader observed the empty window of replace_all"
                );
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
}

#[tokio::test]
async fn service_treats_codec_error_as_cache_miss() {
    let (repository, pool) = setup_repository().await;

    sqlx::query(
        r#"
        INSERT INTO cached_posts (
            post_id, title, content, hashtags_json, create_time,
            author_json, clips_json, music_json, like_count, is_liked
        ) VALUES ('bad', 't', 'c', 'not json', 1, '{}', '[]', NULL, 0, 0)
        "#,
    )
    .execute(pool.get_pool())
    .await
    .unwrap();

    let service = FeedCacheService::new(Arc::new(repository));

    assert!(service.cached_feed().await.unwrap().is_none());
    assert!(service.post_detail("bad").await.unwrap().is_none());
    assert!(service.latest(5).await.unwrap().is_none());
}

#[tokio::test]
async fn service_refresh_and_read_paths() {
    let (repository, _pool) = setup_repository().await;
    let service = FeedCacheService::new(Arc::new(repository));

    let posts = vec![sample_post("s_1", 100), sample_post("s_2", 200)];
    service.refresh(&posts).await.unwrap();

    let feed = service.cached_feed().await.unwrap().unwrap();
    assert_eq!(feed.len(), 2);

    let detail = service.post_detail("s_1").await.unwrap().unwrap();
    assert_eq!(detail.post_id, "s_1");

    let latest = service.latest(1).await.unwrap().unwrap();
    assert_eq!(latest[0].post_id, "s_2");

    service.clear().await.unwrap();
    assert!(service.cached_feed().await.unwrap().unwrap().is_empty());
}

#[tokio::test]
async fn pool_from_config_serves_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("croissant_database.db").display()
        ),
        ..DatabaseConfig::default()
    };

    let pool = ConnectionPool::from_config(&config).await.unwrap();
    let repository = SqliteRepository::new(pool.clone());
    repository.initialize().await.unwrap();

    repository
        .upsert_many(&[sample_post("cfg_1", 1)])
        .await
        .unwrap();
    assert_eq!(repository.get_all().await.unwrap().len(), 1);

    pool.close().await;
}

#[tokio::test]
async fn health_check_reports_live_pool() {
    let (repository, _pool) = setup_repository().await;
    assert!(repository.health_check().await.unwrap());
}
