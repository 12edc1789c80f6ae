use serde::{Deserialize, Serialize};

/// The persisted short link. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub short_code: String,
    pub original_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
