use std::env;
use std::net::IpAddr;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HOST is not a valid IP address: {0}")]
    InvalidHost(String),

    #[error("DATABASE_URL is invalid: {0}")]
    InvalidDatabaseUrl(#[source] sqlx::Error),
}

/// Where the database lives
#[derive(Clone, Debug)]
pub enum DatabaseConfig {
    /// Full connection string, takes precedence over the discrete settings
    Url(PgConnectOptions),
    Parts {
        host: String,
        port: u16,
        user: String,
        password: String,
        database: String,
    },
}

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    pub host: IpAddr,

    /// Default: 8080
    pub port: u16,

    pub database: DatabaseConfig,

    /// Normalized URL prefix (`/jobdash`), `None` when served at the root only
    pub mount_prefix: Option<String>,

    /// Shared secret for destructive endpoints. `None` disables them entirely.
    pub admin_token: Option<String>,

    pub static_dir: String,

    pub log_dir: String,
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup
    ///
    /// Numeric values that fail to parse fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match lookup("HOST") {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost(raw.clone()))?,
            _ => IpAddr::from([0, 0, 0, 0]),
        };

        let port = lookup("PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(8080);

        let database = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => DatabaseConfig::Url(
                PgConnectOptions::from_str(url.trim()).map_err(ConfigError::InvalidDatabaseUrl)?,
            ),
            None => DatabaseConfig::Parts {
                host: lookup("DB_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                port: lookup("DB_PORT")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(5432),
                user: lookup("DB_USER").unwrap_or_else(|| "postgres".to_string()),
                password: lookup("DB_PASSWORD").unwrap_or_default(),
                database: lookup("DB_NAME").unwrap_or_else(|| "jobdash".to_string()),
            },
        };

        let mount_prefix = lookup("BASE_PATH").and_then(|raw| normalize_mount_prefix(&raw));

        let admin_token = lookup("ADMIN_TOKEN").filter(|token| !token.is_empty());

        Ok(Config {
            host,
            port,
            database,
            mount_prefix,
            admin_token,
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "public".to_string()),
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
        })
    }
}

/// Normalize a mount prefix: leading `/` enforced, trailing slashes stripped,
/// and an empty or bare `/` prefix collapses to `None`.
pub fn normalize_mount_prefix(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with('/') {
        Some(trimmed.to_string())
    } else {
        Some(format!("/{}", trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn mount_prefix_gets_leading_slash_and_loses_trailing_ones() {
        assert_eq!(normalize_mount_prefix("jobdash/"), Some("/jobdash".to_string()));
        assert_eq!(normalize_mount_prefix("/jobdash///"), Some("/jobdash".to_string()));
        assert_eq!(normalize_mount_prefix("/ops/jobs"), Some("/ops/jobs".to_string()));
    }

    #[test]
    fn bare_slash_or_empty_prefix_means_root() {
        assert_eq!(normalize_mount_prefix("/"), None);
        assert_eq!(normalize_mount_prefix("///"), None);
        assert_eq!(normalize_mount_prefix(""), None);
        assert_eq!(normalize_mount_prefix("   "), None);
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, IpAddr::from([0, 0, 0, 0]));
        assert!(config.mount_prefix.is_none());
        assert!(config.admin_token.is_none());
        assert_eq!(config.static_dir, "public");
        match config.database {
            DatabaseConfig::Parts { host, port, user, database, .. } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 5432);
                assert_eq!(user, "postgres");
                assert_eq!(database, "jobdash");
            }
            DatabaseConfig::Url(_) => panic!("expected discrete database settings"),
        }
    }

    #[test]
    fn unparsable_port_falls_back_to_default() {
        let config = config_from(&[("PORT", "eighty"), ("DB_PORT", "x")]).unwrap();
        assert_eq!(config.port, 8080);
        match config.database {
            DatabaseConfig::Parts { port, .. } => assert_eq!(port, 5432),
            DatabaseConfig::Url(_) => panic!("expected discrete database settings"),
        }
    }

    #[test]
    fn empty_admin_token_is_treated_as_unset() {
        let config = config_from(&[("ADMIN_TOKEN", "")]).unwrap();
        assert!(config.admin_token.is_none());

        let config = config_from(&[("ADMIN_TOKEN", "s3cret")]).unwrap();
        assert_eq!(config.admin_token.as_deref(), Some("s3cret"));
    }

    #[test]
    fn base_path_is_normalized() {
        let config = config_from(&[("BASE_PATH", "jobdash/")]).unwrap();
        assert_eq!(config.mount_prefix.as_deref(), Some("/jobdash"));
    }

    #[test]
    fn database_url_overrides_parts() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://ops:pw@db.internal:6543/queue"),
            ("DB_HOST", "ignored"),
        ])
        .unwrap();

        match config.database {
            DatabaseConfig::Url(options) => {
                assert_eq!(options.get_host(), "db.internal");
                assert_eq!(options.get_port(), 6543);
                assert_eq!(options.get_database(), Some("queue"));
            }
            DatabaseConfig::Parts { .. } => panic!("expected DATABASE_URL to win"),
        }
    }

    #[test]
    fn invalid_host_is_rejected() {
        assert!(matches!(
            config_from(&[("HOST", "not-an-ip")]),
            Err(ConfigError::InvalidHost(_))
        ));
    }
}
