use actix_web::{App, HttpServer, middleware::Logger};
use clap::Parser;
use tracing::{error, info};

mod api;
mod cli;
mod config;
mod db;
mod http;
mod logging;
mod shutdown;

use crate::cli::{Cli, Command};
use crate::http::AppState;
use crate::shutdown::ShutdownCoordinator;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    logging::init(&config.log_dir)?;

    info!("Starting jobdash");
    info!("  - Listen address: {}:{}", config.host, config.port);
    info!("  - Mount prefix: {}", config.mount_prefix.as_deref().unwrap_or("(none)"));
    info!("  - Admin delete: {}", if config.admin_token.is_some() { "enabled" } else { "disabled" });
    info!("  - Max database connections: {}", db::connection::MAX_CONNECTIONS);

    let pool = match db::connection::create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };
    info!("Database connection pool established");

    // The listener must not start against a missing or broken schema.
    match db::bootstrap::bootstrap(&pool).await {
        Ok(report) => info!(
            "Schema ready ({} existing rows, {} seeded)",
            report.existing_rows, report.seeded_rows
        ),
        Err(e) => {
            error!("Schema bootstrap failed: {}", e);
            std::process::exit(1);
        }
    }

    if cli.command() == Command::Bootstrap {
        pool.close().await;
        return Ok(());
    }

    let state = AppState::new(pool.clone(), &config);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| state.configure(cfg))
    })
    .disable_signals()
    .bind((config.host, config.port))?
    .run();

    info!("Server listening on http://{}:{}", config.host, config.port);

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, pool)
        .wait_for_shutdown()
        .await
}
