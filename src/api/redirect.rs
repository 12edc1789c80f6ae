//! Short code redirect endpoint
//!
//! The hot path: `GET /{code}` resolves the code and answers with a 302
//! to the original URL. 302 rather than 301 so responses stay
//! re-resolvable if click tracking is ever added.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, error, trace};

use crate::errors::ShortlyError;
use crate::services::LinkService;

use super::error_response;

pub struct RedirectService {}

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        service: web::Data<LinkService>,
    ) -> impl Responder {
        let code = path.into_inner();

        match service.resolve(&code).await {
            Ok(link) => {
                trace!("Redirecting '{}' -> '{}'", code, link.original_url);
                HttpResponse::Found()
                    .insert_header(("Location", link.original_url))
                    .finish()
            }
            // Malformed and unknown codes both land here, on purpose.
            Err(ShortlyError::NotFound(_)) => {
                debug!("Short code not resolved: {}", code);
                Self::not_found_response()
            }
            Err(e) => {
                error!("Database error during redirect lookup: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        error_response(StatusCode::NOT_FOUND, "Short URL not found")
    }
}

/// Catch-all redirect route; must be registered after the API scopes.
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("")
        .route("/{code}", web::get().to(RedirectService::handle_redirect))
        .route("/{code}", web::head().to(RedirectService::handle_redirect))
}
