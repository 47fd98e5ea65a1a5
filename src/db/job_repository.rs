use sqlx::{Pool, Postgres, QueryBuilder};
use tracing::debug;

use crate::api::job::models::JobListParams;
use crate::db::models::JobRow;

const SELECT_JOBS: &str = r#"
    SELECT "jobID", wo_no_sec, wo_desc, service_ro_no, operation_no, task_desc,
           customer_name, ar_account_rep_account_rep_email,
           "startTime", "endTime", "currentWorkflow", status
    FROM jobs"#;

/// Repository for Job database operations
pub struct JobRepository;

impl JobRepository {
    /// Build the list statement; status and limit are bound, ordering comes from fixed literals
    fn list_query(params: &JobListParams) -> QueryBuilder<'_, Postgres> {
        let mut builder = QueryBuilder::new(SELECT_JOBS);

        if let Some(status) = &params.status {
            builder.push(" WHERE status = ").push_bind(status.as_str());
        }

        builder
            .push(" ORDER BY ")
            .push(params.sort_column.sql())
            .push(" ")
            .push(params.sort_direction.sql())
            .push(" LIMIT ")
            .push_bind(params.limit);

        builder
    }

    /// Fetch jobs matching the resolved filter, ordering and limit
    pub async fn list(
        pool: &Pool<Postgres>,
        params: &JobListParams,
    ) -> Result<Vec<JobRow>, sqlx::Error> {
        let mut builder = Self::list_query(params);
        debug!("Listing jobs: {}", builder.sql());

        builder.build_query_as::<JobRow>().fetch_all(pool).await
    }

    /// Delete a job by id and return the number of rows removed
    pub async fn delete(pool: &Pool<Postgres>, job_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(r#"DELETE FROM jobs WHERE "jobID" = $1"#)
            .bind(job_id)
            .execute(pool)
            .await?;

        debug!("Delete of job {} removed {} rows", job_id, result.rows_affected());
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::job::models::{ListJobsQuery, SortColumn, SortDirection};

    fn normalized(sql: &str) -> String {
        sql.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn unfiltered_query_binds_only_the_limit() {
        let params = ListJobsQuery::default().resolve();
        let builder = JobRepository::list_query(&params);

        let sql = normalized(builder.sql());
        assert!(sql.ends_with(r#"FROM jobs ORDER BY "startTime" DESC LIMIT $1"#), "{sql}");
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn status_filter_is_bound_not_interpolated() {
        let params = JobListParams {
            status: Some("error' OR '1'='1".to_string()),
            sort_column: SortColumn::JobId,
            sort_direction: SortDirection::Asc,
            limit: 1,
        };
        let builder = JobRepository::list_query(&params);

        let sql = normalized(builder.sql());
        assert!(
            sql.ends_with(r#"FROM jobs WHERE status = $1 ORDER BY "jobID" ASC LIMIT $2"#),
            "{sql}"
        );
        assert!(!sql.contains("OR '1'"));
    }

    /// Expects a scratch database; run ignored tests with `--test-threads=1`.
    #[actix_web::test]
    #[ignore = "requires database"]
    async fn seeded_scenarios() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = sqlx::PgPool::connect(&url).await.expect("pool creation failed");
        sqlx::query("DROP TABLE IF EXISTS jobs")
            .execute(&pool)
            .await
            .expect("drop failed");
        crate::db::bootstrap::bootstrap(&pool).await.expect("bootstrap failed");

        let query = ListJobsQuery {
            status: Some("error".to_string()),
            limit: Some("1".to_string()),
            ..Default::default()
        };
        let rows = JobRepository::list(&pool, &query.resolve()).await.expect("list failed");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].job_id, 10003);
        assert_eq!(rows[0].status, "error");

        let query = ListJobsQuery {
            sort: Some("jobID:asc".to_string()),
            ..Default::default()
        };
        let ids: Vec<i64> = JobRepository::list(&pool, &query.resolve())
            .await
            .expect("list failed")
            .into_iter()
            .map(|row| row.job_id)
            .collect();
        assert_eq!(ids, [10001, 10002, 10003, 10004]);

        let query = ListJobsQuery {
            status: Some("bogus".to_string()),
            ..Default::default()
        };
        let rows = JobRepository::list(&pool, &query.resolve()).await.expect("list failed");
        assert!(rows.is_empty());

        assert_eq!(JobRepository::delete(&pool, 99999).await.expect("delete failed"), 0);
        assert_eq!(JobRepository::delete(&pool, 10004).await.expect("delete failed"), 1);
        assert_eq!(JobRepository::delete(&pool, 10004).await.expect("delete failed"), 0);
    }
}
