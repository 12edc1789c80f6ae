use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStore;
pub use models::Link;

/// Persistence contract for links.
///
/// The store exclusively owns the persisted rows. Uniqueness of
/// `short_code` is enforced here (unique index), so concurrent inserts of
/// the same code resolve to one success and one distinct collision error.
#[async_trait::async_trait]
pub trait LinkStore: Send + Sync {
    /// Persist a new link, assigning its id and creation timestamp.
    ///
    /// Fails with `ShortlyError::CodeCollision` when `short_code` is
    /// already taken, and with a database error for anything else.
    async fn insert(&self, short_code: &str, original_url: &str) -> Result<Link>;

    /// Look up a link by its short code.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>>;

    /// Newest-first page of links plus the true total row count.
    ///
    /// `limit` caps the returned page but never the reported total.
    async fn list_recent(&self, limit: u64) -> Result<(Vec<Link>, u64)>;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStore>> {
        let backend_type = backend::infer_backend_from_url(&config.database_url)?;
        let store = SeaOrmStore::new(config, &backend_type).await?;
        Ok(Arc::new(store))
    }
}
