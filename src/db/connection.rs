use sqlx::{
    Error, Pool, Postgres,
    postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::config::DatabaseConfig;

/// Hard cap on concurrently open connections; callers queue beyond this.
pub const MAX_CONNECTIONS: u32 = 10;

/// Connection options for the configured database
///
/// Every session runs with `timezone = UTC` so timestamps are read and
/// written in UTC regardless of the server default.
pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    let options = match config {
        DatabaseConfig::Url(options) => options.clone(),
        DatabaseConfig::Parts {
            host,
            port,
            user,
            password,
            database,
        } => PgConnectOptions::new()
            .host(host)
            .port(*port)
            .username(user)
            .password(password)
            .database(database),
    };

    options.options([("timezone", "UTC")])
}

/// Create a PostgreSQL connection pool
///
/// # Returns
/// A connection pool with at most [`MAX_CONNECTIONS`] connections
pub async fn create_pool(config: &DatabaseConfig) -> Result<Pool<Postgres>, Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(connect_options(config))
        .await
}
