use actix_web::{HttpResponse, error::InternalError, web};
use serde::Serialize;
use tracing::warn;

/// Failure envelope shared by every endpoint: `{ "ok": false, "error": "..." }`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// Query-string extractor config that answers undecodable input in the standard envelope
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        warn!("Rejected query string for {}: {}", req.path(), err);
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}
