mod common;

use chrono::Utc;
use shortlink::domain::entities::NewShortLink;
use shortlink::infrastructure::storage::{SqliteStorage, StorageError, StorageOptions};
use sqlx::SqlitePool;
use std::time::Duration;

#[sqlx::test]
async fn test_save_initializes_counter_and_timestamps(pool: SqlitePool) {
    let storage = SqliteStorage::from_pool(pool);
    let before = Utc::now();

    let link = storage
        .save(&NewShortLink::new("abc123", "https://example.com"))
        .await
        .unwrap();

    assert!(link.id > 0);
    assert_eq!(link.code, "abc123");
    assert_eq!(link.original_url, "https://example.com");
    assert_eq!(link.visit_count, 0);
    assert_eq!(link.created_at, link.updated_at);
    assert!(link.created_at >= before);
}

#[sqlx::test]
async fn test_save_duplicate_code_is_rejected(pool: SqlitePool) {
    let storage = SqliteStorage::from_pool(pool.clone());

    storage
        .save(&NewShortLink::new("dup001", "https://first.com"))
        .await
        .unwrap();

    let result = storage
        .save(&NewShortLink::new("dup001", "https://second.com"))
        .await;

    assert!(matches!(result, Err(StorageError::Unique)));

    // The original record is untouched
    let stored = storage.find_by_code("dup001").await.unwrap();
    assert_eq!(stored.original_url, "https://first.com");
    assert_eq!(common::link_count(&pool).await, 1);
}

#[sqlx::test]
async fn test_save_same_url_twice_creates_two_records(pool: SqlitePool) {
    let storage = SqliteStorage::from_pool(pool);

    let first = storage
        .save(&NewShortLink::new("same01", "https://example.com"))
        .await
        .unwrap();
    let second = storage
        .save(&NewShortLink::new("same02", "https://example.com"))
        .await
        .unwrap();

    assert_ne!(first.code, second.code);
    assert!(second.id > first.id);
}

#[sqlx::test]
async fn test_find_by_code(pool: SqlitePool) {
    common::create_test_link(&pool, "find01", "https://example.com/page").await;
    let storage = SqliteStorage::from_pool(pool);

    let link = storage.find_by_code("find01").await.unwrap();

    assert_eq!(link.code, "find01");
    assert_eq!(link.original_url, "https://example.com/page");
    assert_eq!(link.visit_count, 0);
}

#[sqlx::test]
async fn test_find_by_code_is_case_sensitive(pool: SqlitePool) {
    common::create_test_link(&pool, "AbC123", "https://example.com").await;
    let storage = SqliteStorage::from_pool(pool);

    assert!(storage.find_by_code("AbC123").await.is_ok());
    assert!(matches!(
        storage.find_by_code("abc123").await,
        Err(StorageError::NotFound)
    ));
}

#[sqlx::test]
async fn test_find_by_code_not_found(pool: SqlitePool) {
    let storage = SqliteStorage::from_pool(pool);

    let result = storage.find_by_code("missing").await;

    assert!(matches!(result, Err(StorageError::NotFound)));
}

#[sqlx::test]
async fn test_increment_visits(pool: SqlitePool) {
    let storage = SqliteStorage::from_pool(pool.clone());
    let created = storage
        .save(&NewShortLink::new("inc001", "https://example.com"))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;

    storage.increment_visits("inc001").await.unwrap();
    storage.increment_visits("inc001").await.unwrap();

    let link = storage.find_by_code("inc001").await.unwrap();
    assert_eq!(link.visit_count, 2);
    assert_eq!(link.created_at, created.created_at);
    assert!(link.updated_at > created.updated_at);
    assert_eq!(common::visit_count(&pool, "inc001").await, 2);
}

#[sqlx::test]
async fn test_increment_visits_missing_code(pool: SqlitePool) {
    let storage = SqliteStorage::from_pool(pool);

    let result = storage.increment_visits("missing").await;

    assert!(matches!(result, Err(StorageError::NoRowsUpdated)));
}

#[sqlx::test]
async fn test_concurrent_increments_are_not_lost(pool: SqlitePool) {
    common::create_test_link(&pool, "hot001", "https://example.com").await;
    let storage = common::create_test_storage(pool.clone());

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let storage = storage.clone();
            tokio::spawn(async move { storage.increment_visits("hot001").await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(common::visit_count(&pool, "hot001").await, 50);
}

#[sqlx::test]
async fn test_empty_code_is_rejected(pool: SqlitePool) {
    let storage = SqliteStorage::from_pool(pool);

    assert!(matches!(
        storage.save(&NewShortLink::new("", "https://example.com")).await,
        Err(StorageError::EmptyCode)
    ));
    assert!(matches!(
        storage.find_by_code("").await,
        Err(StorageError::EmptyCode)
    ));
    assert!(matches!(
        storage.increment_visits("").await,
        Err(StorageError::EmptyCode)
    ));
}

#[sqlx::test]
async fn test_ping_and_close(pool: SqlitePool) {
    let storage = SqliteStorage::from_pool(pool);

    assert!(storage.ping().await.is_ok());
    assert!(!storage.is_closed());

    storage.close().await;
    storage.close().await;

    assert!(storage.is_closed());
    assert!(matches!(storage.ping().await, Err(StorageError::Database(_))));
}

#[tokio::test]
async fn test_connect_applies_migrations() {
    let options = StorageOptions {
        max_connections: 1,
        ..StorageOptions::default()
    };

    let storage = SqliteStorage::connect("sqlite::memory:", &options)
        .await
        .unwrap();

    let link = storage
        .save(&NewShortLink::new("mem001", "https://example.com"))
        .await
        .unwrap();
    assert_eq!(link.visit_count, 0);

    storage.close().await;
}
