//! # Service Configuration
//!
//! Read once from the environment at startup.
//!
//! | Variable               | Default | Effect                                        |
//! |------------------------|---------|-----------------------------------------------|
//! | `PORT`                 | `5000`  | TCP port to bind on all interfaces            |
//! | `DATABASE_URL`         | unset   | Persist submissions to PostgreSQL             |
//! | `ITAX_STORE`           | unset   | `memory` keeps submissions in-process instead |
//! | `ITAX_METRICS_ENABLED` | `true`  | `false` skips the Prometheus recorder         |
//! | `ITAX_LOG_FORMAT`      | `text`  | `json` switches to JSON log lines             |

pub const DEFAULT_PORT: u16 = 5000;

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Where calculation submissions are stored.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Submissions are not stored; the request variant without user fields.
    #[default]
    Disabled,
    /// In-process store, lost on restart.
    Memory,
    /// PostgreSQL at the given URL.
    Postgres(String),
}

impl std::fmt::Debug for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Memory => f.write_str("Memory"),
            Self::Postgres(_) => f.write_str("Postgres([REDACTED])"),
        }
    }
}

/// Runtime configuration for the API binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub store: StoreBackend,
    pub metrics_enabled: bool,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            store: StoreBackend::Disabled,
            metrics_enabled: true,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Build configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let store = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => StoreBackend::Postgres(url),
            None => match lookup("ITAX_STORE") {
                Some(v) if v.eq_ignore_ascii_case("memory") => StoreBackend::Memory,
                _ => StoreBackend::Disabled,
            },
        };

        let metrics_enabled = lookup("ITAX_METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let log_format = match lookup("ITAX_LOG_FORMAT") {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            port,
            store,
            metrics_enabled,
            log_format,
        }
    }
}
