//! `LinkStore` implementation for the SeaORM backend

use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::debug;
use uuid::Uuid;

use super::converters::{link_to_active_model, model_to_link};
use super::{SeaOrmStore, retry};
use crate::errors::{Result, ShortlyError};
use crate::storage::{Link, LinkStore};

use migration::entities::link;

/// A plain insert: the unique index on `short_code` is the collision
/// detector, so no upsert and no pre-read.
#[async_trait::async_trait]
impl LinkStore for SeaOrmStore {
    async fn insert(&self, short_code: &str, original_url: &str) -> Result<Link> {
        let new_link = Link {
            id: Uuid::new_v4().to_string(),
            short_code: short_code.to_string(),
            original_url: original_url.to_string(),
            created_at: Utc::now(),
        };

        let db = &self.db;
        let result = retry::with_retry(
            &format!("insert({})", short_code),
            self.retry_config,
            || async { link::Entity::insert(link_to_active_model(&new_link)).exec(db).await },
        )
        .await;

        match result {
            Ok(_) => {
                debug!("Link inserted: {} -> {}", new_link.short_code, new_link.original_url);
                Ok(new_link)
            }
            Err(e) => {
                if matches!(
                    e.sql_err(),
                    Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
                ) {
                    Err(ShortlyError::code_collision(format!(
                        "Short code '{}' already exists",
                        short_code
                    )))
                } else {
                    Err(ShortlyError::database_operation(format!(
                        "Failed to insert link '{}': {}",
                        short_code, e
                    )))
                }
            }
        }
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>> {
        let db = &self.db;
        let code_owned = short_code.to_string();

        let model = retry::with_retry(
            &format!("find_by_code({})", short_code),
            self.retry_config,
            || async {
                link::Entity::find()
                    .filter(link::Column::ShortCode.eq(code_owned.clone()))
                    .one(db)
                    .await
            },
        )
        .await
        .map_err(|e| {
            ShortlyError::database_operation(format!(
                "Failed to look up short code '{}': {}",
                short_code, e
            ))
        })?;

        Ok(model.map(model_to_link))
    }

    async fn list_recent(&self, limit: u64) -> Result<(Vec<Link>, u64)> {
        let db = &self.db;

        let total = retry::with_retry("list_recent(count)", self.retry_config, || async {
            link::Entity::find().count(db).await
        })
        .await
        .map_err(|e| {
            ShortlyError::database_operation(format!("Failed to count links: {}", e))
        })?;

        let models = retry::with_retry("list_recent(page)", self.retry_config, || async {
            link::Entity::find()
                .order_by_desc(link::Column::CreatedAt)
                .limit(limit)
                .all(db)
                .await
        })
        .await
        .map_err(|e| {
            ShortlyError::database_operation(format!("Failed to list links: {}", e))
        })?;

        Ok((models.into_iter().map(model_to_link).collect(), total))
    }
}
