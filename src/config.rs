use std::env;
use std::net::{IpAddr, SocketAddr};

use crate::tracker::InputPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),

    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Process configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub input_policy: InputPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            database_url: "sqlite://exercise-tracker.db".to_string(),
            max_connections: 5,
            input_policy: InputPolicy::Lenient,
        }
    }
}

/// Loads `.env` from the working directory (or a parent) into the process
/// environment. A missing file is fine; a malformed one is not.
pub fn load_dotenv() -> Result<(), ConfigError> {
    skip_missing(dotenvy::dotenv().map(|_| ()))
}

fn skip_missing(result: Result<(), dotenvy::Error>) -> Result<(), ConfigError> {
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.not_found() => {
            tracing::debug!("no .env file found");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_var(&lookup, "HOST", "an IP address", defaults.host)?;
        let port = parse_var(&lookup, "PORT", "a port number", defaults.port)?;
        let max_connections = parse_var(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            "a positive integer",
            defaults.max_connections,
        )?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                expected: "a positive integer",
                value: "0".to_string(),
            });
        }

        let input_policy = match lookup("INPUT_POLICY") {
            None => defaults.input_policy,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "lenient" => InputPolicy::Lenient,
                "strict" => InputPolicy::Strict,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "INPUT_POLICY",
                        expected: "\"lenient\" or \"strict\"",
                        value,
                    });
                }
            },
        };

        Ok(Self {
            host,
            port,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections,
            input_policy,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, expected: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(_) => Err(ConfigError::Invalid {
                key,
                expected,
                value,
            }),
        },
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
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.input_policy, InputPolicy::Lenient);
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_reads_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("INPUT_POLICY", "Strict"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.input_policy, InputPolicy::Strict);
    }

    #[test]
    fn test_missing_dotenv_file_is_skipped() {
        let missing = dotenvy::from_filename("no-such-file.env").map(|_| ());
        assert!(skip_missing(missing).is_ok());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(
            skip_missing(Err(dotenvy::Error::Io(io))),
            Err(ConfigError::DotEnv(_))
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("INPUT_POLICY", "loose")]).is_err());
        assert!(config_from(&[("DATABASE_MAX_CONNECTIONS", "0")]).is_err());
    }
}
