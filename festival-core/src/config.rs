//! Configuration management for the festival API.

use std::env;
use std::path::PathBuf;

use crate::{Error, Result};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATA_PATH: &str = "data/festivals.json";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Port the standalone server binds to
    pub port: u16,
    /// Location of the festival dataset
    pub data_path: PathBuf,
    /// Re-read the dataset on every request instead of caching it
    pub reload_per_request: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            reload_per_request: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT must be a port number, got {:?}", raw)))?,
            None => DEFAULT_PORT,
        };

        let reload_per_request = match lookup("FESTIVALS_RELOAD_PER_REQUEST") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                Error::Config(format!(
                    "FESTIVALS_RELOAD_PER_REQUEST must be true or false, got {:?}",
                    raw
                ))
            })?,
            None => false,
        };

        Ok(Self {
            port,
            data_path: lookup("FESTIVALS_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            reload_per_request,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("FESTIVALS_DATA_PATH", "/srv/festivals.json"),
            ("FESTIVALS_RELOAD_PER_REQUEST", "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("/srv/festivals.json"));
        assert!(config.reload_per_request);
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
