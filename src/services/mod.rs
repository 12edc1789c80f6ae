mod link_service;

pub use link_service::{LinkService, RECENT_LIST_LIMIT, SHORT_CODE_ATTEMPTS};
