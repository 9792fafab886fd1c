//! Daemon settings.
//!
//! Read from an optional `carrental.toml` in the working directory, then
//! overridden by `CARRENTAL_*` environment variables (and `RUST_LOG` for the
//! log filter). Unknown keys in the file are rejected so typos surface at
//! startup instead of being silently ignored.

use std::path::Path;

use serde::Deserialize;

const CONFIG_FILE: &str = "carrental.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// `[server]`: where the HTTP API listens.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// `[database]`: an sqlx `SQLite` URL such as `sqlite:carrental.db?mode=rwc`.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
}

/// `[logging]`: a `tracing_subscriber::EnvFilter` directive.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:carrental.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "carrentald=info,carrental=info,tower_http=debug".to_string(),
        }
    }
}

impl Config {
    /// Settings for this process: file, then environment, then checks.
    ///
    /// # Errors
    ///
    /// Fails on an unreadable or malformed file, an unparsable port in the
    /// environment, or settings that cannot be served (port 0, empty URL).
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::read(Path::new(CONFIG_FILE))?;
        config.override_with(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// A missing file means "all defaults".
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(ConfigError::Io(err)),
        };
        Ok(toml::from_str(&text)?)
    }

    /// Layer environment values over the file. `env` resolves a variable
    /// name; `CARRENTAL_BIND` wins over `CARRENTAL_HOST`/`CARRENTAL_PORT`
    /// and `RUST_LOG` over `CARRENTAL_LOG`.
    fn override_with(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(host) = env("CARRENTAL_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env("CARRENTAL_PORT") {
            self.server.port = parse_port("CARRENTAL_PORT", &port)?;
        }
        if let Some(bind) = env("CARRENTAL_BIND") {
            let (host, port) = bind.rsplit_once(':').ok_or_else(|| {
                ConfigError::Validation(format!("CARRENTAL_BIND must be host:port, got {bind}"))
            })?;
            self.server.port = parse_port("CARRENTAL_BIND", port)?;
            self.server.host = host.to_string();
        }
        if let Some(url) = env("CARRENTAL_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(filter) = env("RUST_LOG").or_else(|| env("CARRENTAL_LOG")) {
            self.logging.filter = filter;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port cannot be 0".to_string()));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Validation("database.url is empty".to_string()));
        }
        Ok(())
    }

    /// `host:port`, as handed to `TcpListener::bind`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

fn parse_port(variable: &str, raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Validation(format!("{variable}: {raw:?} is not a port")))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed carrental.toml")]
    Parse(#[from] toml::de::Error),
    #[error("cannot read carrental.toml")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn with_env(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<&str, &str> = vars.iter().copied().collect();
        let mut config = Config::default();
        config.override_with(|name| env.get(name).map(ToString::to_string))?;
        Ok(config)
    }

    #[test]
    fn should_serve_on_port_3000_with_local_database_by_default() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.database_url(), "sqlite:carrental.db?mode=rwc");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_fill_missing_sections_with_defaults() {
        let config: Config = toml::from_str("[database]\nurl = 'sqlite::memory:'").unwrap();
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.server.port, 3000);
        assert!(config.logging.filter.contains("tower_http"));
    }

    #[test]
    fn should_reject_unknown_keys() {
        let result: Result<Config, _> = toml::from_str("[server]\nprot = 8080");
        assert!(result.is_err());
    }

    #[test]
    fn should_fall_back_to_defaults_when_file_is_absent() {
        let config = Config::read(Path::new("does-not-exist/carrental.toml")).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn should_refuse_port_zero_and_blank_database_url() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = Config::default();
        config.database.url = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_take_host_port_and_database_from_env() {
        let config = with_env(&[
            ("CARRENTAL_HOST", "127.0.0.1"),
            ("CARRENTAL_PORT", "8081"),
            ("CARRENTAL_DATABASE_URL", "sqlite::memory:"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
        assert_eq!(config.database_url(), "sqlite::memory:");
    }

    #[test]
    fn should_let_bind_win_over_host_and_port() {
        let config = with_env(&[
            ("CARRENTAL_HOST", "127.0.0.1"),
            ("CARRENTAL_PORT", "8081"),
            ("CARRENTAL_BIND", "localhost:9000"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "localhost:9000");
    }

    #[test]
    fn should_fail_when_env_port_is_not_a_number() {
        assert!(matches!(
            with_env(&[("CARRENTAL_PORT", "eighty")]),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            with_env(&[("CARRENTAL_BIND", "localhost")]),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_let_rust_log_win_over_carrental_log() {
        let config = with_env(&[("CARRENTAL_LOG", "warn"), ("RUST_LOG", "trace")]).unwrap();
        assert_eq!(config.logging.filter, "trace");

        let config = with_env(&[("CARRENTAL_LOG", "warn")]).unwrap();
        assert_eq!(config.logging.filter, "warn");
    }
}
