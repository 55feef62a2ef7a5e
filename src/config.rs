use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Symcheck";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> &'static str {
    "info,symcheck=debug"
}

/// Get the application data directory
/// ~/Symcheck/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Credentials and endpoint for the external inference service.
/// A missing app-id/app-key pair is a startup-time error, never a
/// runtime one.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub base_url: String,
    pub app_id: String,
    pub app_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub frontend_origin: String,
    pub session_ttl_secs: u64,
    pub inference: InferenceConfig,
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read configuration through a variable lookup. Factored out from
    /// `from_env` so tests don't have to mutate process-global state.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = match var("SYMCHECK_BIND") {
            Some(raw) => raw.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid { var: "SYMCHECK_BIND", reason: e.to_string() }
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 5000)),
        };

        let db_path = var("SYMCHECK_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| app_data_dir().join("symcheck.db"));

        let frontend_origin = var("SYMCHECK_FRONTEND_ORIGIN")
            .unwrap_or_else(|| "http://localhost:5173".to_string());

        let session_ttl_secs = parse_secs(var("SESSION_TTL_SECS"), "SESSION_TTL_SECS", 3600)?;

        let inference = InferenceConfig {
            base_url: var("INFERENCE_API_URL")
                .ok_or(ConfigError::MissingVar("INFERENCE_API_URL"))?,
            app_id: var("INFERENCE_APP_ID")
                .ok_or(ConfigError::MissingVar("INFERENCE_APP_ID"))?,
            app_key: var("INFERENCE_APP_KEY")
                .ok_or(ConfigError::MissingVar("INFERENCE_APP_KEY"))?,
            timeout_secs: parse_secs(var("INFERENCE_TIMEOUT_SECS"), "INFERENCE_TIMEOUT_SECS", 5)?,
        };

        Ok(Self {
            bind_addr,
            db_path,
            frontend_origin,
            session_ttl_secs,
            inference,
        })
    }
}

fn parse_secs(
    raw: Option<String>,
    var: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|e: std::num::ParseIntError| ConfigError::Invalid { var, reason: e.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_env(key: &str) -> Option<String> {
        match key {
            "INFERENCE_API_URL" => Some("https://api.example.com/v3".into()),
            "INFERENCE_APP_ID" => Some("app-id".into()),
            "INFERENCE_APP_KEY" => Some("app-key".into()),
            _ => None,
        }
    }

    #[test]
    fn defaults_applied_when_optional_vars_absent() {
        let config = Config::from_vars(full_env).unwrap();
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 5000)));
        assert_eq!(config.frontend_origin, "http://localhost:5173");
        assert_eq!(config.session_ttl_secs, 3600);
        assert_eq!(config.inference.timeout_secs, 5);
        assert!(config.db_path.ends_with("symcheck.db"));
    }

    #[test]
    fn missing_inference_credentials_fail_startup() {
        let err = Config::from_vars(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("INFERENCE_API_URL")));

        let err = Config::from_vars(|key| match key {
            "INFERENCE_API_URL" => Some("https://api.example.com".into()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("INFERENCE_APP_ID")));
    }

    #[test]
    fn overrides_are_honored() {
        let config = Config::from_vars(|key| match key {
            "SYMCHECK_BIND" => Some("0.0.0.0:8080".into()),
            "SYMCHECK_DB" => Some("/tmp/custom.db".into()),
            "SESSION_TTL_SECS" => Some("120".into()),
            "INFERENCE_TIMEOUT_SECS" => Some("9".into()),
            other => full_env(other),
        })
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.db_path, PathBuf::from("/tmp/custom.db"));
        assert_eq!(config.session_ttl_secs, 120);
        assert_eq!(config.inference.timeout_secs, 9);
    }

    #[test]
    fn bad_values_are_invalid_not_defaulted() {
        let err = Config::from_vars(|key| match key {
            "SYMCHECK_BIND" => Some("not-an-addr".into()),
            other => full_env(other),
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "SYMCHECK_BIND", .. }));

        let err = Config::from_vars(|key| match key {
            "SESSION_TTL_SECS" => Some("soon".into()),
            other => full_env(other),
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "SESSION_TTL_SECS", .. }));
    }

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with(APP_NAME));
    }
}
