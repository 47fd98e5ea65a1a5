use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Lifecycle state of a job as stored in the `status` column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Running,
    Success,
    Error,
    Cancelled,
}

impl JobStatus {
    pub const ALL: [JobStatus; 5] = [
        JobStatus::Queued,
        JobStatus::Running,
        JobStatus::Success,
        JobStatus::Error,
        JobStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Success => "success",
            JobStatus::Error => "error",
            JobStatus::Cancelled => "cancelled",
        }
    }
}

/// Database representation of a job with all fields
///
/// Serialized field names match the column names exactly.
#[derive(Debug, FromRow, Serialize)]
pub struct JobRow {
    #[sqlx(rename = "jobID")]
    #[serde(rename = "jobID")]
    pub job_id: i64,
    pub wo_no_sec: String,
    pub wo_desc: String,
    pub service_ro_no: Option<String>,
    pub operation_no: Option<String>,
    pub task_desc: Option<String>,
    pub customer_name: Option<String>,
    pub ar_account_rep_account_rep_email: Option<String>,
    #[sqlx(rename = "startTime")]
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[sqlx(rename = "endTime")]
    #[serde(rename = "endTime")]
    pub end_time: Option<DateTime<Utc>>,
    #[sqlx(rename = "currentWorkflow")]
    #[serde(rename = "currentWorkflow")]
    pub current_workflow: Option<String>,
    pub status: String,
}
