use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sqlx::{Pool, Postgres};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::validation::ErrorResponse;
use crate::db::job_repository::JobRepository;
use super::dto::{DeleteJobResponse, ListJobsResponse};
use super::models::ListJobsQuery;

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Database operation failed; the driver's message is passed through
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Admin token missing, wrong, or not configured
    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid jobID")]
    InvalidJobId(String),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::InvalidJobId(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Database(e) => error!("Database error: {}", e),
            ServiceError::Forbidden => warn!("Rejected delete: admin token check failed"),
            ServiceError::InvalidJobId(raw) => warn!("Rejected delete: invalid jobID {:?}", raw),
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}

/// Fail-closed admin check: an unconfigured token forbids everything
pub fn is_authorized(configured: Option<&str>, presented: Option<&str>) -> bool {
    match (configured, presented) {
        (Some(expected), Some(given)) => !expected.is_empty() && expected == given,
        _ => false,
    }
}

pub fn parse_job_id(raw: &str) -> Result<i64, ServiceError> {
    raw.trim()
        .parse()
        .map_err(|_| ServiceError::InvalidJobId(raw.to_string()))
}

/// Job service containing business logic
pub struct JobService {
    pool: Pool<Postgres>,
    admin_token: Option<String>,
}

impl JobService {
    /// Create a new JobService instance
    pub fn new(pool: Pool<Postgres>, admin_token: Option<String>) -> Self {
        Self { pool, admin_token }
    }

    /// List jobs with the requested filter, ordering and limit
    ///
    /// Malformed sort or limit values never fail; they resolve to defaults.
    pub async fn list_jobs(&self, query: &ListJobsQuery) -> Result<ListJobsResponse, ServiceError> {
        let params = query.resolve();
        info!(
            "Service: Listing jobs status={:?} sort={:?}:{:?} limit={}",
            params.status, params.sort_column, params.sort_direction, params.limit
        );

        let rows = JobRepository::list(&self.pool, &params).await?;

        Ok(ListJobsResponse {
            ok: true,
            count: rows.len(),
            rows,
        })
    }

    /// Delete a job after checking the admin token and the id
    ///
    /// # Returns
    /// - `Ok(DeleteJobResponse)` - including `affected_rows == 0` for an unknown id
    /// - `Err(ServiceError::Forbidden)` - token check failed, checked before the id
    /// - `Err(ServiceError::InvalidJobId)` - id is not an integer; no query is issued
    pub async fn delete_job(
        &self,
        raw_job_id: &str,
        presented_token: Option<&str>,
    ) -> Result<DeleteJobResponse, ServiceError> {
        if !is_authorized(self.admin_token.as_deref(), presented_token) {
            return Err(ServiceError::Forbidden);
        }

        let job_id = parse_job_id(raw_job_id)?;
        let affected_rows = JobRepository::delete(&self.pool, job_id).await?;

        info!("Service: Deleted job {} ({} rows affected)", job_id, affected_rows);

        Ok(DeleteJobResponse {
            ok: true,
            affected_rows,
        })
    }
}
