use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`). Model calls on
    /// large documents are slow, so this is well above a typical API timeout.
    pub request_timeout_secs: u64,
    /// Root directory for uploaded files (default: `./storage`).
    pub storage_dir: PathBuf,
    /// Largest accepted upload in bytes (default: 25 MiB).
    pub max_upload_bytes: usize,
    /// Number of activity events kept, newest first (default: `100`).
    pub activity_log_limit: usize,
    /// Project id stamped on uploaded documents (default: `default`).
    pub default_project_id: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:9002`    |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                      |
    /// | `STORAGE_DIR`          | `./storage`                |
    /// | `MAX_UPLOAD_BYTES`     | `26214400`                 |
    /// | `ACTIVITY_LOG_LIMIT`   | `100`                      |
    /// | `DEFAULT_PROJECT_ID`   | `default`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:9002".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let storage_dir =
            PathBuf::from(std::env::var("STORAGE_DIR").unwrap_or_else(|_| "./storage".into()));

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "26214400".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let activity_log_limit: usize = std::env::var("ACTIVITY_LOG_LIMIT")
            .unwrap_or_else(|_| "100".into())
            .parse()
            .expect("ACTIVITY_LOG_LIMIT must be a valid usize");

        let default_project_id =
            std::env::var("DEFAULT_PROJECT_ID").unwrap_or_else(|_| "default".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage_dir,
            max_upload_bytes,
            activity_log_limit,
            default_project_id,
        }
    }
}
