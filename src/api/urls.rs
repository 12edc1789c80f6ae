//! URL creation and listing endpoints

use actix_web::{HttpResponse, Responder, web};
use tracing::{error, info, trace};

use crate::config::HttpConfig;
use crate::services::LinkService;

use super::error_from_service;
use super::types::{CreateUrlRequest, ListUrlsResponse, UrlResponse};

/// `POST /urls` - shorten a URL.
pub async fn create_url(
    payload: web::Json<CreateUrlRequest>,
    service: web::Data<LinkService>,
    http_config: web::Data<HttpConfig>,
) -> impl Responder {
    trace!("Create request for target: {}", payload.original_url);

    match service.create(&payload.original_url).await {
        Ok(link) => {
            HttpResponse::Created().json(UrlResponse::from_link(link, &http_config.base_url))
        }
        Err(e) => {
            error!("Failed to create link: {}", e);
            error_from_service(&e)
        }
    }
}

/// `GET /urls` - recent links for the dashboard, newest first.
pub async fn list_urls(
    service: web::Data<LinkService>,
    http_config: web::Data<HttpConfig>,
) -> impl Responder {
    match service.list_recent().await {
        Ok((links, total)) => {
            info!("Listing {} links (total: {})", links.len(), total);
            let urls = links
                .into_iter()
                .map(|link| UrlResponse::from_link(link, &http_config.base_url))
                .collect();
            HttpResponse::Ok().json(ListUrlsResponse { urls, total })
        }
        Err(e) => {
            error!("Failed to list links: {}", e);
            error_from_service(&e)
        }
    }
}

/// Routes for the URL management endpoints.
pub fn url_routes() -> actix_web::Scope {
    web::scope("/urls")
        .route("", web::post().to(create_url))
        .route("", web::get().to(list_urls))
}
