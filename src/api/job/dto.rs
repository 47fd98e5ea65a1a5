use serde::Serialize;
use crate::db::models::JobRow;

/// Response for `GET /api/jobs`
#[derive(Serialize)]
pub struct ListJobsResponse {
    pub ok: bool,
    pub count: usize,
    pub rows: Vec<JobRow>,
}

/// Response for `DELETE /api/jobs/{id}`
#[derive(Serialize)]
pub struct DeleteJobResponse {
    pub ok: bool,
    #[serde(rename = "affectedRows")]
    pub affected_rows: u64,
}
