//! HTTP boundary
//!
//! Thin handlers that parse requests, call the `LinkService`, and map
//! results onto the wire contract. All error bodies share the
//! `{ statusCode, message }` shape.

pub mod redirect;
pub mod types;
pub mod urls;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::errors::ShortlyError;
use self::types::ErrorBody;

/// Build a JSON error response with the shared body shape.
pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ErrorBody {
            status_code: status.as_u16(),
            message: message.to_string(),
        })
}

/// Map a service error onto its HTTP status and error body.
pub fn error_from_service(err: &ShortlyError) -> HttpResponse {
    let status = err.http_status();
    // Internal failure details stay in the logs, not on the wire.
    let message = if status.is_server_error() {
        "Internal server error"
    } else {
        err.message()
    };
    error_response(status, message)
}

/// Handler for malformed JSON payloads, so body parse failures use the
/// same error shape as validation failures.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    let response = error_response(StatusCode::BAD_REQUEST, &err.to_string());
    actix_web::error::InternalError::from_response(err, response).into()
}
