use std::str::FromStr;

use kredit_core::credit::{TenorTable, DEFAULT_TENOR_LIMITS};

use crate::auth::jwt::JwtConfig;

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output for local development.
    #[default]
    Pretty,
    /// One JSON object per line for log shippers.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}', expected 'pretty' or 'json'")),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `15`).
    pub request_timeout_secs: u64,
    /// Log output format (default: pretty).
    pub log_format: LogFormat,
    /// Token secrets and expiry windows.
    pub jwt: JwtConfig,
    /// Credit ceilings seeded for every new customer.
    pub tenor_limits: TenorTable,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                           |
    /// |------------------------|---------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                         |
    /// | `PORT`                 | `3000`                                            |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                           |
    /// | `REQUEST_TIMEOUT_SECS` | `15`                                              |
    /// | `LOG_FORMAT`           | `pretty`                                          |
    /// | `DEFAULT_TENOR_LIMITS` | `1:100000.00,2:200000.00,3:500000.00,6:700000.00` |
    ///
    /// JWT settings are documented on [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let log_format = log_format_from_env();

        let tenor_limits: TenorTable = std::env::var("DEFAULT_TENOR_LIMITS")
            .unwrap_or_else(|_| DEFAULT_TENOR_LIMITS.into())
            .parse()
            .unwrap_or_else(|e| panic!("DEFAULT_TENOR_LIMITS is invalid: {e}"));

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            log_format,
            jwt,
            tenor_limits,
        }
    }
}

/// Read `LOG_FORMAT` on its own, so tracing can be initialised before the
/// rest of the configuration is loaded.
pub fn log_format_from_env() -> LogFormat {
    std::env::var("LOG_FORMAT")
        .map(|v| v.parse().expect("LOG_FORMAT must be 'pretty' or 'json'"))
        .unwrap_or_default()
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
