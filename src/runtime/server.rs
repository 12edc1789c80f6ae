//! Server mode
//!
//! Configures and starts the HTTP server: CORS, shared state, the URL
//! API scope, and the catch-all redirect route last.

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, middleware::Compress, web};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::api::{json_error_handler, redirect::redirect_routes, urls::url_routes};
use crate::config::AppConfig;
use crate::services::LinkService;
use crate::storage::{LinkStore, SeaOrmStore};

/// Build CORS middleware from the configured origin list.
///
/// Empty list = same-origin only; `"*"` = any origin (without
/// credentials); otherwise each origin is allowed explicitly and
/// credentialed requests are supported.
fn build_cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        cors = cors.supports_credentials();
    }

    cors
}

/// Run the HTTP server until it exits.
pub async fn run_server(config: AppConfig, store: Arc<SeaOrmStore>) -> Result<()> {
    let link_service = web::Data::new(LinkService::new(store as Arc<dyn LinkStore>));
    let http_config = web::Data::new(config.http.clone());
    let allowed_origins = config.http.allowed_origins.clone();

    let cpu_count = config.server.cpu_count.min(32);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!(
        "Starting server at http://{} ({} workers)",
        bind_address, cpu_count
    );

    HttpServer::new(move || {
        let cors = build_cors(&allowed_origins);

        App::new()
            .wrap(cors)
            .wrap(Compress::default())
            .app_data(link_service.clone())
            .app_data(http_config.clone())
            .app_data(web::PayloadConfig::new(64 * 1024))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(url_routes())
            .service(redirect_routes())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(cpu_count)
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}
