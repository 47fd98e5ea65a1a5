use actix_web::{
    HttpRequest, HttpResponse, delete, get,
    web::{Data, Path, Query, ServiceConfig, scope},
};

use super::models::ListJobsQuery;
use super::service::{JobService, ServiceError};

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

#[get("")]
async fn list_jobs(
    service: Data<JobService>,
    query: Query<ListJobsQuery>,
) -> Result<HttpResponse, ServiceError> {
    let response = service.list_jobs(&query).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/{job_id}")]
async fn delete_job(
    req: HttpRequest,
    service: Data<JobService>,
    path: Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let token = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    let response = service.delete_job(&path, token).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(scope("/jobs").service(list_jobs).service(delete_job));
}
