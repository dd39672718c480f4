//! Environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

use crate::error::AppError;

const DEV_SESSION_SECRET: &str = "s3cr3t_s1nt3rkl44s";

/// Settings read from the environment at startup.
#[derive(Clone)]
pub struct AppConfig {
    /// `REDIS_URL`: key-value store connection URL.
    pub redis_url: String,
    /// `SESSION_SECRET`: cookie signing secret.
    pub session_secret: String,
    /// `APP_ENV=production` turns on `Secure` cookies.
    pub secure_cookies: bool,
    /// `PUZZLE_FILE`: optional YAML answer table replacing the bundled one.
    pub puzzle_file: Option<PathBuf>,
    /// `HOST`, default `0.0.0.0`.
    pub host: String,
    /// `PORT`, default `3000`.
    pub port: u16,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `REDIS_URL` is unset, `PORT` is not a
    /// valid port, or `SESSION_SECRET` is unset in production.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let redis_url = lookup("REDIS_URL")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Config("REDIS_URL environment variable must be set".into()))?;

        let production = lookup("APP_ENV").is_some_and(|v| v.eq_ignore_ascii_case("production"));

        let session_secret = match lookup("SESSION_SECRET").filter(|v| !v.is_empty()) {
            Some(secret) => secret,
            None if production => {
                return Err(AppError::Config(
                    "SESSION_SECRET environment variable must be set in production".into(),
                ));
            }
            None => {
                warn!("SESSION_SECRET not set; using the development secret");
                DEV_SESSION_SECRET.to_owned()
            }
        };

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_owned())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;

        Ok(Self {
            redis_url,
            session_secret,
            secure_cookies: production,
            puzzle_file: lookup("PUZZLE_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            host,
            port,
        })
    }

    /// Socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("redis_url", &self.redis_url)
            .field("secure_cookies", &self.secure_cookies)
            .field("puzzle_file", &self.puzzle_file)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_outside_production() {
        let config = AppConfig::from_lookup(lookup_from(&[("REDIS_URL", "redis://cache:6379")])).unwrap();

        assert_eq!(config.redis_url, "redis://cache:6379");
        assert_eq!(config.session_secret, DEV_SESSION_SECRET);
        assert!(!config.secure_cookies);
        assert_eq!(config.puzzle_file, None);
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_production_enables_secure_cookies() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("REDIS_URL", "redis://cache:6379"),
            ("SESSION_SECRET", "hunter2"),
            ("APP_ENV", "Production"),
            ("PORT", "8080"),
            ("PUZZLE_FILE", "/etc/sintquest/puzzle.yaml"),
        ]))
        .unwrap();

        assert!(config.secure_cookies);
        assert_eq!(config.session_secret, "hunter2");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.puzzle_file,
            Some(PathBuf::from("/etc/sintquest/puzzle.yaml"))
        );
    }

    #[test]
    fn test_production_requires_secret() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("REDIS_URL", "redis://cache:6379"),
            ("APP_ENV", "production"),
        ]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_missing_redis_url_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[]));

        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("REDIS_URL")));
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("REDIS_URL", "redis://cache:6379"),
            ("PORT", "eighty"),
        ]));

        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("PORT")));
    }
}
