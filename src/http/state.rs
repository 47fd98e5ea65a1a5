use std::path::PathBuf;

use actix_web::web;
use sqlx::{Pool, Postgres};

use crate::api::{job::JobService, validation};
use crate::config::Config;

/// Everything a worker needs to build its route table
///
/// Built once in `main` and cloned into each actix worker.
#[derive(Clone)]
pub struct AppState {
    pool: Pool<Postgres>,
    jobs: web::Data<JobService>,
    mount_prefix: Option<String>,
    static_dir: PathBuf,
}

impl AppState {
    pub fn new(pool: Pool<Postgres>, config: &Config) -> Self {
        Self::with_settings(
            pool,
            config.admin_token.clone(),
            config.mount_prefix.clone(),
            PathBuf::from(&config.static_dir),
        )
    }

    pub fn with_settings(
        pool: Pool<Postgres>,
        admin_token: Option<String>,
        mount_prefix: Option<String>,
        static_dir: PathBuf,
    ) -> Self {
        let jobs = web::Data::new(JobService::new(pool.clone(), admin_token));
        Self {
            pool,
            jobs,
            mount_prefix,
            static_dir,
        }
    }

    pub fn mount_prefix(&self) -> Option<&str> {
        self.mount_prefix.as_deref()
    }

    /// Register shared data and all routes on an app
    pub fn configure(&self, config: &mut web::ServiceConfig) {
        config
            .app_data(web::Data::new(self.pool.clone()))
            .app_data(self.jobs.clone())
            .app_data(validation::query_config());

        super::routes(config, self.mount_prefix(), &self.static_dir);
    }
}
