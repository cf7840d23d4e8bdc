//! Application-level configuration loading: listening port, CORS origin and broadcast cadence.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use axum::http::HeaderValue;
use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "SCOREBOARD_CONFIG_PATH";
/// Environment variables that override the configured port, checked in order.
const PORT_ENVS: [&str; 2] = ["PORT", "SERVER_PORT"];

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_BROADCAST_INTERVAL: Duration = Duration::from_millis(5_000);

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// TCP port the HTTP server binds on every interface.
    pub port: u16,
    /// Single browser origin allowed by the CORS layer.
    pub allowed_origin: HeaderValue,
    /// Delay between two unconditional board broadcasts.
    pub broadcast_interval: Duration,
}

impl AppConfig {
    /// Load the configuration from disk, then apply the port environment override.
    ///
    /// A missing or unreadable file yields the built-in defaults.
    pub fn load() -> Self {
        Self::load_with(|name| env::var(name).ok())
    }

    /// Same as [`AppConfig::load`], reading environment variables through `lookup`.
    pub fn load_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = resolve_config_path(&lookup);
        let mut config = match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json_str(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded configuration file");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        if let Some(port) = port_from_env(&lookup) {
            config.port = port;
        }
        config
    }

    /// Parse a JSON document; absent keys keep their default value.
    pub fn from_json_str(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            allowed_origin: HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN),
            broadcast_interval: DEFAULT_BROADCAST_INTERVAL,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    port: Option<u16>,
    allowed_origin: Option<String>,
    broadcast_interval_ms: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();

        let allowed_origin = match value.allowed_origin {
            Some(origin) => HeaderValue::from_str(&origin).unwrap_or_else(|err| {
                warn!(origin = %origin, error = %err, "invalid allowed_origin; using default");
                defaults.allowed_origin.clone()
            }),
            None => defaults.allowed_origin.clone(),
        };

        let broadcast_interval = match value.broadcast_interval_ms {
            Some(0) => {
                warn!("broadcast_interval_ms must be positive; using default");
                defaults.broadcast_interval
            }
            Some(ms) => Duration::from_millis(ms),
            None => defaults.broadcast_interval,
        };

        Self {
            port: value.port.unwrap_or(defaults.port),
            allowed_origin,
            broadcast_interval,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path(lookup: &impl Fn(&str) -> Option<String>) -> PathBuf {
    lookup(CONFIG_PATH_ENV)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// First port variable that is set wins; an unparseable value is ignored.
fn port_from_env(lookup: &impl Fn(&str) -> Option<String>) -> Option<u16> {
    let (name, value) = PORT_ENVS
        .iter()
        .find_map(|name| lookup(*name).map(|value| (*name, value)))?;
    match value.trim().parse::<u16>() {
        Ok(port) => Some(port),
        Err(err) => {
            warn!(variable = name, value = %value, error = %err, "invalid port override; ignored");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io::Write};

    use tempfile::NamedTempFile;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_reference_deployment() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.allowed_origin, "http://localhost:5173");
        assert_eq!(config.broadcast_interval, Duration::from_secs(5));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::from_json_str(r#"{"port": 4000}"#).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.allowed_origin, "http://localhost:5173");
        assert_eq!(config.broadcast_interval, Duration::from_secs(5));
    }

    #[test]
    fn full_file_overrides_everything() {
        let config = AppConfig::from_json_str(
            r#"{"port": 8080, "allowed_origin": "https://scores.example", "broadcast_interval_ms": 250}"#,
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.allowed_origin, "https://scores.example");
        assert_eq!(config.broadcast_interval, Duration::from_millis(250));
    }

    #[test]
    fn zero_interval_and_bad_origin_fall_back() {
        let config = AppConfig::from_json_str(
            r#"{"allowed_origin": "bad\norigin", "broadcast_interval_ms": 0}"#,
        )
        .unwrap();
        assert_eq!(config.allowed_origin, "http://localhost:5173");
        assert_eq!(config.broadcast_interval, Duration::from_secs(5));
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(AppConfig::from_json_str("{ port: }").is_err());
    }

    #[test]
    fn port_variable_overrides_file() {
        let file = config_file(r#"{"port": 4000}"#);
        let path = file.path().to_str().unwrap();

        let config = AppConfig::load_with(env_of(&[(CONFIG_PATH_ENV, path), ("PORT", "5050")]));
        assert_eq!(config.port, 5050);
    }

    #[test]
    fn server_port_is_the_fallback_variable() {
        let config = AppConfig::load_with(env_of(&[
            (CONFIG_PATH_ENV, "/nonexistent/scoreboard.json"),
            ("SERVER_PORT", "6060"),
        ]));
        assert_eq!(config.port, 6060);

        let config = AppConfig::load_with(env_of(&[
            (CONFIG_PATH_ENV, "/nonexistent/scoreboard.json"),
            ("PORT", "5050"),
            ("SERVER_PORT", "6060"),
        ]));
        assert_eq!(config.port, 5050);
    }

    #[test]
    fn unparseable_port_variable_is_ignored() {
        let file = config_file(r#"{"port": 4000}"#);
        let path = file.path().to_str().unwrap();

        let config = AppConfig::load_with(env_of(&[(CONFIG_PATH_ENV, path), ("PORT", "http")]));
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn config_path_variable_selects_the_file() {
        let file = config_file(
            r#"{"allowed_origin": "https://scores.example", "broadcast_interval_ms": 750}"#,
        );
        let path = file.path().to_str().unwrap();

        let config = AppConfig::load_with(env_of(&[(CONFIG_PATH_ENV, path)]));
        assert_eq!(config.port, 3000);
        assert_eq!(config.allowed_origin, "https://scores.example");
        assert_eq!(config.broadcast_interval, Duration::from_millis(750));
    }

    #[test]
    fn missing_or_malformed_file_falls_back_to_defaults() {
        let config = AppConfig::load_with(env_of(&[(
            CONFIG_PATH_ENV,
            "/nonexistent/scoreboard.json",
        )]));
        assert_eq!(config.port, 3000);
        assert_eq!(config.broadcast_interval, Duration::from_secs(5));

        let file = config_file("{ port: }");
        let path = file.path().to_str().unwrap();
        let config = AppConfig::load_with(env_of(&[(CONFIG_PATH_ENV, path)]));
        assert_eq!(config.allowed_origin, "http://localhost:5173");
    }
}
