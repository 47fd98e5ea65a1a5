use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use sqlx::{Pool, Postgres};
use tracing::error;

use crate::api::validation::ErrorResponse;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db: bool,
}

/// Health check endpoint
///
/// Round-trips `SELECT 1` through the pool. Unauthenticated, and the only
/// endpoint that reports the raw database error on failure.
#[get("/health")]
async fn health_check(pool: web::Data<Pool<Postgres>>) -> impl Responder {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(HealthResponse { ok: true, db: true }),
        Err(e) => {
            error!("Health check failed: {:?}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config.service(health_check);
}
