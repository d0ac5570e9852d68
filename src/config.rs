use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub max_sessions: usize,
    /// Sessions untouched for this long are evicted.
    pub session_idle_ttl: Duration,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let server = ServerConfig {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_var("APP_PORT", 8080)?,
        };
        let max_upload_mb: usize = parse_var("MAX_UPLOAD_MB", 20)?;
        Ok(Self {
            server,
            max_sessions: parse_var("MAX_SESSIONS", 1024)?,
            session_idle_ttl: Duration::from_secs(parse_var("SESSION_IDLE_SECS", 60 * 60)?),
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 8080,
            },
            max_sessions: 1024,
            session_idle_ttl: Duration::from_secs(60 * 60),
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => v
            .trim()
            .parse::<T>()
            .with_context(|| format!("parse {}={:?}", key, v)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_falls_back_to_default_when_unset() {
        let v: usize = parse_var("HOMIESKITCHEN_TEST_UNSET_VAR", 7).unwrap();
        assert_eq!(v, 7);
    }

    #[test]
    fn parse_var_rejects_garbage() {
        std::env::set_var("HOMIESKITCHEN_TEST_BAD_PORT", "eighty");
        let err = parse_var::<u16>("HOMIESKITCHEN_TEST_BAD_PORT", 8080).unwrap_err();
        assert!(err.to_string().contains("HOMIESKITCHEN_TEST_BAD_PORT"));
    }
}
