use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | data and log directory |
/// | DATABASE_PATH | $WORK_DIR/hr.db | SQLite file |
/// | HTTP_PORT | 8080 | listen port |
/// | ENVIRONMENT | development | development / production |
/// | LOG_LEVEL | info | fallback when RUST_LOG is unset |
/// | LOG_JSON | false | JSON log lines |
/// | SEED_DEMO_DATA | false | load the demo organization into an empty store |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | graceful shutdown budget |
///
/// `JWT_*` variables are read by [`JwtConfig`].
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub database_path: String,
    pub http_port: u16,
    pub jwt: JwtConfig,
    /// development | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub seed_demo_data: bool,
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let work_dir = lookup("WORK_DIR").unwrap_or_else(|| "./data".into());
        let database_path = lookup("DATABASE_PATH").unwrap_or_else(|| {
            PathBuf::from(&work_dir)
                .join("hr.db")
                .to_string_lossy()
                .into_owned()
        });

        Self {
            database_path,
            http_port: lookup("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt: JwtConfig::from_lookup(&lookup),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: lookup("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            seed_demo_data: lookup("SEED_DEMO_DATA")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            shutdown_timeout_ms: lookup("SHUTDOWN_TIMEOUT_MS")
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
            work_dir,
        }
    }

    /// Directory for rolling log files
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
