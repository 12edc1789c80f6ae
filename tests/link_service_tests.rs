//! LinkService tests
//!
//! Service-layer behavior against a real SQLite store, plus collision
//! handling against a mock store (collisions cannot be forced through
//! the CSPRNG).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tempfile::TempDir;

use shortly::config::DatabaseConfig;
use shortly::errors::{Result as ShortlyResult, ShortlyError};
use shortly::services::{LinkService, RECENT_LIST_LIMIT, SHORT_CODE_ATTEMPTS};
use shortly::storage::{Link, LinkStore, SeaOrmStore};

// =============================================================================
// Test Setup
// =============================================================================

/// Create a service backed by a fresh temporary SQLite database.
async fn create_test_service() -> (LinkService, Arc<SeaOrmStore>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("service_test.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..DatabaseConfig::default()
    };

    let store = Arc::new(
        SeaOrmStore::new(&config, "sqlite")
            .await
            .expect("Failed to create store"),
    );
    let service = LinkService::new(store.clone() as Arc<dyn LinkStore>);
    (service, store, temp_dir)
}

fn is_url_safe(code: &str) -> bool {
    code.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_and_resolve_roundtrip() {
    let (service, _store, _dir) = create_test_service().await;

    let link = service
        .create("https://example.com/some/long/path?q=1")
        .await
        .expect("create failed");

    assert_eq!(link.short_code.len(), 6);
    assert!(is_url_safe(&link.short_code));
    assert!(!link.id.is_empty());

    let resolved = service
        .resolve(&link.short_code)
        .await
        .expect("resolve failed");
    assert_eq!(
        resolved.original_url,
        "https://example.com/some/long/path?q=1"
    );
    assert_eq!(resolved.id, link.id);
}

#[tokio::test]
async fn test_create_rejects_non_http_scheme() {
    let (service, _store, _dir) = create_test_service().await;

    let result = service.create("ftp://example.com").await;
    assert!(matches!(result, Err(ShortlyError::Validation(_))));

    // Nothing may be persisted on a rejected create.
    let (links, total) = service.list_recent().await.unwrap();
    assert!(links.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_create_rejects_dangerous_scheme() {
    let (service, _store, _dir) = create_test_service().await;

    let result = service.create("javascript:alert(1)").await;
    assert!(matches!(result, Err(ShortlyError::Validation(_))));
}

#[tokio::test]
async fn test_create_rejects_overlong_url() {
    let (service, _store, _dir) = create_test_service().await;

    let url = format!("https://example.com/{}", "a".repeat(2048));
    let result = service.create(&url).await;
    assert!(matches!(result, Err(ShortlyError::Validation(_))));
}

#[tokio::test]
async fn test_create_rejects_empty_url() {
    let (service, _store, _dir) = create_test_service().await;

    let result = service.create("").await;
    assert!(matches!(result, Err(ShortlyError::Validation(_))));
}

#[tokio::test]
async fn test_created_codes_are_distinct() {
    let (service, _store, _dir) = create_test_service().await;

    let a = service.create("https://example.com/a").await.unwrap();
    let b = service.create("https://example.com/b").await.unwrap();
    assert_ne!(a.short_code, b.short_code);
    assert_ne!(a.id, b.id);
}

// =============================================================================
// Resolve
// =============================================================================

#[tokio::test]
async fn test_resolve_unknown_code_not_found() {
    let (service, _store, _dir) = create_test_service().await;

    let result = service.resolve("zzzzzz").await;
    assert!(matches!(result, Err(ShortlyError::NotFound(_))));
}

#[tokio::test]
async fn test_resolve_malformed_code_not_found() {
    let (service, _store, _dir) = create_test_service().await;

    for code in ["abc!23", "abc", "abcdefg", "", "abc 12", "abc/12"] {
        let result = service.resolve(code).await;
        assert!(
            matches!(result, Err(ShortlyError::NotFound(_))),
            "expected NotFound for {:?}",
            code
        );
    }
}

#[tokio::test]
async fn test_resolve_is_idempotent() {
    let (service, _store, _dir) = create_test_service().await;

    let link = service.create("https://example.com/x").await.unwrap();
    for _ in 0..3 {
        let resolved = service.resolve(&link.short_code).await.unwrap();
        assert_eq!(resolved.original_url, "https://example.com/x");
    }
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_recent_empty() {
    let (service, _store, _dir) = create_test_service().await;

    let (links, total) = service.list_recent().await.unwrap();
    assert!(links.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_list_recent_newest_first() {
    let (service, _store, _dir) = create_test_service().await;

    for i in 0..5 {
        service
            .create(&format!("https://example.com/page/{}", i))
            .await
            .unwrap();
        // created_at has sub-second precision; keep orderings unambiguous
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (links, total) = service.list_recent().await.unwrap();
    assert_eq!(total, 5);
    assert_eq!(links.len(), 5);
    for pair in links.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
    assert_eq!(links[0].original_url, "https://example.com/page/4");
}

#[tokio::test]
async fn test_list_recent_caps_page_but_not_total() {
    let (service, store, _dir) = create_test_service().await;

    // Insert directly through the store to keep this fast.
    for i in 0..(RECENT_LIST_LIMIT + 3) {
        let code = format!("c{:05}", i);
        store
            .insert(&code, &format!("https://example.com/{}", i))
            .await
            .unwrap();
    }

    let (links, total) = service.list_recent().await.unwrap();
    assert_eq!(links.len(), RECENT_LIST_LIMIT as usize);
    assert_eq!(total, RECENT_LIST_LIMIT + 3);
}

// =============================================================================
// Store-level collision behavior
// =============================================================================

#[tokio::test]
async fn test_store_insert_duplicate_code_is_distinct_error() {
    let (_service, store, _dir) = create_test_service().await;

    store
        .insert("fixed1", "https://example.com/first")
        .await
        .unwrap();

    let result = store.insert("fixed1", "https://example.com/second").await;
    assert!(matches!(result, Err(ShortlyError::CodeCollision(_))));

    // The original row must be untouched.
    let survivor = store.find_by_code("fixed1").await.unwrap().unwrap();
    assert_eq!(survivor.original_url, "https://example.com/first");
}

// =============================================================================
// Collision retry (mock store)
// =============================================================================

/// Store that reports collisions for the first `collisions` inserts.
struct CollidingStore {
    collisions: usize,
    calls: AtomicUsize,
}

impl CollidingStore {
    fn new(collisions: usize) -> Self {
        Self {
            collisions,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LinkStore for CollidingStore {
    async fn insert(&self, short_code: &str, original_url: &str) -> ShortlyResult<Link> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.collisions {
            return Err(ShortlyError::code_collision(format!(
                "Short code '{}' already exists",
                short_code
            )));
        }
        Ok(Link {
            id: format!("id-{}", call),
            short_code: short_code.to_string(),
            original_url: original_url.to_string(),
            created_at: Utc::now(),
        })
    }

    async fn find_by_code(&self, _short_code: &str) -> ShortlyResult<Option<Link>> {
        Ok(None)
    }

    async fn list_recent(&self, _limit: u64) -> ShortlyResult<(Vec<Link>, u64)> {
        Ok((Vec::new(), 0))
    }
}

#[tokio::test]
async fn test_create_retries_on_collision() {
    let store = Arc::new(CollidingStore::new(2));
    let service = LinkService::new(store.clone() as Arc<dyn LinkStore>);

    let link = service.create("https://example.com/retry").await.unwrap();
    assert_eq!(link.short_code.len(), 6);
    // two collisions + one success
    assert_eq!(store.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_create_gives_up_after_bounded_attempts() {
    let store = Arc::new(CollidingStore::new(usize::MAX));
    let service = LinkService::new(store.clone() as Arc<dyn LinkStore>);

    let result = service.create("https://example.com/doomed").await;
    assert!(matches!(result, Err(ShortlyError::CodeSpaceExhausted(_))));
    assert_eq!(store.calls.load(Ordering::SeqCst), SHORT_CODE_ATTEMPTS);
}

/// Store that always fails with a non-collision database error.
struct BrokenStore;

#[async_trait]
impl LinkStore for BrokenStore {
    async fn insert(&self, _short_code: &str, _original_url: &str) -> ShortlyResult<Link> {
        Err(ShortlyError::database_operation("connection reset"))
    }

    async fn find_by_code(&self, _short_code: &str) -> ShortlyResult<Option<Link>> {
        Err(ShortlyError::database_operation("connection reset"))
    }

    async fn list_recent(&self, _limit: u64) -> ShortlyResult<(Vec<Link>, u64)> {
        Err(ShortlyError::database_operation("connection reset"))
    }
}

#[tokio::test]
async fn test_create_does_not_retry_storage_failures() {
    let service = LinkService::new(Arc::new(BrokenStore) as Arc<dyn LinkStore>);

    let result = service.create("https://example.com/broken").await;
    assert!(matches!(result, Err(ShortlyError::DatabaseOperation(_))));
}
