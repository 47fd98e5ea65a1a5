use sqlx::{Pool, Postgres};
use tracing::{debug, info, warn};

use crate::db::models::JobStatus;

const CREATE_STATUS_INDEX: &str =
    r#"CREATE INDEX IF NOT EXISTS idx_jobs_status ON jobs (status)"#;

const CREATE_START_TIME_INDEX: &str =
    r#"CREATE INDEX IF NOT EXISTS idx_jobs_start_time ON jobs ("startTime")"#;

/// One demo job in each of the common states, timed relative to `NOW()`
const SEED_JOBS: &str = r#"
    INSERT INTO jobs (
        "jobID", wo_no_sec, wo_desc, service_ro_no, operation_no, task_desc,
        customer_name, ar_account_rep_account_rep_email,
        "startTime", "endTime", "currentWorkflow", status
    ) VALUES
        (10001, 'WO-10001', 'Transcode master to mezzanine', 'RO-501', 'OP-1',
         'Transcode ProRes master', 'Northwind Media', 'reps@northwind.example',
         NOW() - INTERVAL '2 hours', NULL, 'transcode', 'running'),
        (10002, 'WO-10002', 'Generate proxies', 'RO-502', 'OP-2',
         'Low-res proxy render', 'Contoso Studios', 'accounts@contoso.example',
         NOW() - INTERVAL '90 minutes', NULL, NULL, 'queued'),
        (10003, 'WO-10003', 'Subtitle burn-in', 'RO-503', 'OP-3',
         'Burn in EN subtitles', 'Fabrikam Films', NULL,
         NOW() - INTERVAL '3 hours', NOW() - INTERVAL '150 minutes', 'burn-in', 'error'),
        (10004, 'WO-10004', 'Loudness normalization', 'RO-504', 'OP-4',
         'Normalize to -23 LUFS', 'Northwind Media', 'reps@northwind.example',
         NOW() - INTERVAL '5 hours', NOW() - INTERVAL '4 hours', 'audio-qc', 'success')
"#;

/// Number of rows `SEED_JOBS` inserts
pub const SEED_ROW_COUNT: u64 = 4;

/// Outcome of a bootstrap run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Rows present before seeding was considered
    pub existing_rows: i64,
    /// Rows inserted by this run; zero unless the table was empty
    pub seeded_rows: u64,
}

fn create_table_sql() -> String {
    let statuses = JobStatus::ALL
        .iter()
        .map(|status| format!("'{}'", status.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            "jobID" BIGINT PRIMARY KEY,
            wo_no_sec VARCHAR(64) NOT NULL,
            wo_desc TEXT NOT NULL,
            service_ro_no VARCHAR(64),
            operation_no VARCHAR(64),
            task_desc TEXT,
            customer_name TEXT,
            ar_account_rep_account_rep_email TEXT,
            "startTime" TIMESTAMPTZ NOT NULL,
            "endTime" TIMESTAMPTZ,
            "currentWorkflow" TEXT,
            status TEXT NOT NULL DEFAULT '{default}' CHECK (status IN ({statuses}))
        )
        "#,
        default = JobStatus::Queued.as_str(),
        statuses = statuses,
    )
}

/// Ensure the `jobs` table and its indexes exist, seeding demo rows into an empty table
///
/// Safe to run on every start: table and index creation are idempotent and
/// seeding only happens when the table has no rows.
pub async fn bootstrap(pool: &Pool<Postgres>) -> Result<BootstrapReport, sqlx::Error> {
    let mut conn = pool.acquire().await?;

    info!("Ensuring jobs schema exists");
    sqlx::query(&create_table_sql()).execute(&mut *conn).await?;
    sqlx::query(CREATE_STATUS_INDEX).execute(&mut *conn).await?;
    sqlx::query(CREATE_START_TIME_INDEX).execute(&mut *conn).await?;

    let existing_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(&mut *conn)
        .await?;
    debug!("jobs table holds {} rows", existing_rows);

    if existing_rows > 0 {
        return Ok(BootstrapReport {
            existing_rows,
            seeded_rows: 0,
        });
    }

    let seeded_rows = sqlx::query(SEED_JOBS)
        .execute(&mut *conn)
        .await?
        .rows_affected();
    if seeded_rows == SEED_ROW_COUNT {
        info!("Seeded {} demo jobs into empty table", seeded_rows);
    } else {
        warn!("Expected to seed {} demo jobs, inserted {}", SEED_ROW_COUNT, seeded_rows);
    }

    Ok(BootstrapReport {
        existing_rows,
        seeded_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_definition_allows_every_status() {
        let sql = create_table_sql();
        for status in JobStatus::ALL {
            assert!(sql.contains(&format!("'{}'", status.as_str())));
        }
        assert!(sql.contains("DEFAULT 'queued'"));
        assert!(sql.contains("IF NOT EXISTS"));
    }

    #[test]
    fn seed_covers_four_distinct_states() {
        for status in ["'running'", "'queued'", "'error'", "'success'"] {
            assert_eq!(SEED_JOBS.matches(status).count(), 1, "{status}");
        }
        assert_eq!(SEED_JOBS.matches("(100").count() as u64, SEED_ROW_COUNT);
    }

    /// Runs against a scratch database: the `jobs` table is dropped first.
    #[actix_web::test]
    #[ignore = "requires database"]
    async fn bootstrap_seeds_once() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = sqlx::PgPool::connect(&url).await.expect("pool creation failed");
        sqlx::query("DROP TABLE IF EXISTS jobs")
            .execute(&pool)
            .await
            .expect("drop failed");

        let first = bootstrap(&pool).await.expect("first bootstrap failed");
        assert_eq!(first, BootstrapReport { existing_rows: 0, seeded_rows: SEED_ROW_COUNT });

        let second = bootstrap(&pool).await.expect("second bootstrap failed");
        assert_eq!(second, BootstrapReport { existing_rows: 4, seeded_rows: 0 });

        let statuses: Vec<String> =
            sqlx::query_scalar(r#"SELECT status FROM jobs ORDER BY "jobID""#)
                .fetch_all(&pool)
                .await
                .expect("select failed");
        assert_eq!(statuses, ["running", "queued", "error", "success"]);
    }
}
