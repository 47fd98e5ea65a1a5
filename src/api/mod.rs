pub mod health;
pub mod job;
pub mod validation;

use actix_web::web;

/// Every `/api` route, ready to be mounted at the root or under a prefix
pub fn api_config(config: &mut web::ServiceConfig) {
    config.service(
        web::scope("/api")
            .configure(health::health_config)
            .configure(job::handlers::job_config),
    );
}
