//! Link management service
//!
//! Business logic for creating, resolving and listing short links,
//! independent of the HTTP layer so it can be reused behind any boundary.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{Result, ShortlyError};
use crate::storage::{Link, LinkStore};
use crate::utils::url_validator::validate_url;
use crate::utils::{generate_short_code, is_valid_short_code};

/// Generate-and-insert attempts before giving up on code allocation.
/// The code space holds 64^6 ≈ 6.8e10 combinations, so hitting this
/// bound means something other than bad luck.
pub const SHORT_CODE_ATTEMPTS: usize = 5;

/// Fixed page size for the dashboard listing.
pub const RECENT_LIST_LIMIT: u64 = 100;

/// Service for link operations.
///
/// Stateless apart from the store handle: nothing is cached between
/// requests, and rows are owned exclusively by the store.
pub struct LinkService {
    store: Arc<dyn LinkStore>,
}

impl LinkService {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    /// Shorten a URL: validate, then allocate a unique code and persist.
    ///
    /// Validation happens here even though the HTTP layer also gates
    /// input, so the service stays safe when reused outside that
    /// boundary. Collisions reported by the store are retried with a
    /// fresh code up to `SHORT_CODE_ATTEMPTS` times; every other store
    /// failure propagates immediately.
    pub async fn create(&self, original_url: &str) -> Result<Link> {
        validate_url(original_url).map_err(|e| ShortlyError::validation(e.to_string()))?;
        let target = original_url.trim();

        for attempt in 1..=SHORT_CODE_ATTEMPTS {
            let code = generate_short_code();
            match self.store.insert(&code, target).await {
                Ok(link) => {
                    info!("Created link '{}' -> '{}'", link.short_code, link.original_url);
                    return Ok(link);
                }
                Err(ShortlyError::CodeCollision(_)) => {
                    warn!(
                        "Short code collision on attempt {}/{}, regenerating",
                        attempt, SHORT_CODE_ATTEMPTS
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(ShortlyError::code_space_exhausted(format!(
            "Could not allocate a unique short code after {} attempts",
            SHORT_CODE_ATTEMPTS
        )))
    }

    /// Resolve a short code to its link.
    ///
    /// Malformed codes are rejected before touching the store, but map to
    /// the same `NotFound` as genuinely absent codes: the 404 must not
    /// reveal whether a code is well-formed or merely unallocated.
    pub async fn resolve(&self, short_code: &str) -> Result<Link> {
        if !is_valid_short_code(short_code) {
            return Err(ShortlyError::not_found("Short URL not found"));
        }

        match self.store.find_by_code(short_code).await? {
            Some(link) => Ok(link),
            None => Err(ShortlyError::not_found("Short URL not found")),
        }
    }

    /// Most recent links, newest first, plus the true total count.
    pub async fn list_recent(&self) -> Result<(Vec<Link>, u64)> {
        self.store.list_recent(RECENT_LIST_LIMIT).await
    }
}
