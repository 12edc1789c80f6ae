//! Wire types for the URL API
//!
//! Field names are camelCase on the wire to match the dashboard
//! frontend's contract.

use serde::{Deserialize, Serialize};

use crate::storage::Link;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    pub original_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub id: String,
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
    pub created_at: String,
}

impl UrlResponse {
    /// `short_url` is derived at response time, never stored.
    pub fn from_link(link: Link, base_url: &str) -> Self {
        let short_url = format!("{}/{}", base_url.trim_end_matches('/'), link.short_code);
        Self {
            id: link.id,
            short_code: link.short_code,
            original_url: link.original_url,
            short_url,
            created_at: link.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUrlsResponse {
    pub urls: Vec<UrlResponse>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
}
