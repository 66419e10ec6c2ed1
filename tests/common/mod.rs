#![allow(dead_code)]

use chrono::Utc;
use shortlink::application::services::{RetryPolicy, ShortenerService};
use shortlink::infrastructure::persistence::SqliteLinkRepository;
use shortlink::infrastructure::storage::SqliteStorage;
use shortlink::state::{AppState, Shortener};
use shortlink::utils::code_generator::RandomCodeGenerator;
use sqlx::SqlitePool;
use std::sync::Arc;

pub const TEST_CODE_LENGTH: usize = 6;

pub fn create_test_storage(pool: SqlitePool) -> Arc<SqliteStorage> {
    Arc::new(SqliteStorage::from_pool(pool))
}

pub fn create_test_service(pool: SqlitePool) -> Arc<Shortener> {
    create_test_service_with(pool, TEST_CODE_LENGTH, RetryPolicy::default())
}

pub fn create_test_service_with(
    pool: SqlitePool,
    code_length: usize,
    retry_policy: RetryPolicy,
) -> Arc<Shortener> {
    let storage = create_test_storage(pool);
    let repository = Arc::new(SqliteLinkRepository::new(storage));

    Arc::new(
        ShortenerService::new(repository, RandomCodeGenerator, code_length)
            .with_retry_policy(retry_policy),
    )
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    let storage = create_test_storage(pool);
    let repository = Arc::new(SqliteLinkRepository::new(storage.clone()));
    let shortener = Arc::new(ShortenerService::new(
        repository,
        RandomCodeGenerator,
        TEST_CODE_LENGTH,
    ));

    AppState::new(shortener, storage)
}

pub async fn create_test_link(pool: &SqlitePool, code: &str, url: &str) {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO short_links (code, original_url, visit_count, created_at, updated_at) VALUES (?, ?, 0, ?, ?)",
    )
    .bind(code)
    .bind(url)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn visit_count(pool: &SqlitePool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT visit_count FROM short_links WHERE code = ?")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn link_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
        .fetch_one(pool)
        .await
        .unwrap()
}
