use std::num::IntErrorKind;

use serde::Deserialize;

pub const DEFAULT_LIMIT: i64 = 500;
pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 5000;

/// Raw query string of `GET /api/jobs`
///
/// Every field is kept as text so no input is ever rejected at extraction;
/// [`ListJobsQuery::resolve`] turns it into safe parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListJobsQuery {
    pub status: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<String>,
}

/// Columns the job list may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    JobId,
    WoNoSec,
    WoDesc,
    TaskDesc,
    StartTime,
    EndTime,
    CurrentWorkflow,
    Status,
}

impl SortColumn {
    /// Exact match against the public column name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "jobID" => Some(SortColumn::JobId),
            "wo_no_sec" => Some(SortColumn::WoNoSec),
            "wo_desc" => Some(SortColumn::WoDesc),
            "task_desc" => Some(SortColumn::TaskDesc),
            "startTime" => Some(SortColumn::StartTime),
            "endTime" => Some(SortColumn::EndTime),
            "currentWorkflow" => Some(SortColumn::CurrentWorkflow),
            "status" => Some(SortColumn::Status),
            _ => None,
        }
    }

    /// Quoted SQL identifier; the only column text placed into `ORDER BY`
    pub fn sql(self) -> &'static str {
        match self {
            SortColumn::JobId => r#""jobID""#,
            SortColumn::WoNoSec => "wo_no_sec",
            SortColumn::WoDesc => "wo_desc",
            SortColumn::TaskDesc => "task_desc",
            SortColumn::StartTime => r#""startTime""#,
            SortColumn::EndTime => r#""endTime""#,
            SortColumn::CurrentWorkflow => r#""currentWorkflow""#,
            SortColumn::Status => "status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `asc` in any case; everything else is descending
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Resolved, safe parameters for a job list query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListParams {
    pub status: Option<String>,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
    pub limit: i64,
}

impl ListJobsQuery {
    pub fn resolve(&self) -> JobListParams {
        let (sort_column, sort_direction) = resolve_sort(self.sort.as_deref());

        JobListParams {
            status: self.status.clone().filter(|s| !s.is_empty()),
            sort_column,
            sort_direction,
            limit: resolve_limit(self.limit.as_deref()),
        }
    }
}

/// `column:direction`, defaulting to `startTime:desc`
///
/// A value without a colon is treated as malformed, even if it names a valid column.
pub fn resolve_sort(raw: Option<&str>) -> (SortColumn, SortDirection) {
    match raw.and_then(|s| s.split_once(':')) {
        Some((column, direction)) => (
            SortColumn::parse(column).unwrap_or(SortColumn::StartTime),
            SortDirection::parse(direction),
        ),
        None => (SortColumn::StartTime, SortDirection::Desc),
    }
}

/// Parsed limit clamped to `[MIN_LIMIT, MAX_LIMIT]`, `DEFAULT_LIMIT` when not a number
pub fn resolve_limit(raw: Option<&str>) -> i64 {
    let parsed = match raw.map(|s| s.trim().parse::<i64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => match e.kind() {
            IntErrorKind::PosOverflow => MAX_LIMIT,
            IntErrorKind::NegOverflow => MIN_LIMIT,
            _ => DEFAULT_LIMIT,
        },
        None => DEFAULT_LIMIT,
    };

    parsed.clamp(MIN_LIMIT, MAX_LIMIT)
}
