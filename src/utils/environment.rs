use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Backend used when `API_HOST` is not set
pub const DEFAULT_API_HOST: &str = "http://localhost:3000";
/// Directory name under the platform data directory
pub const APP_DIR_NAME: &str = "galactic-analytics";

const API_HOST_VAR: &str = "API_HOST";
const DATA_DIR_VAR: &str = "GALACTIC_DATA_DIR";

/// Runtime settings resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    api_host: String,
    data_dir: PathBuf,
}

impl AppConfig {
    pub fn new(api_host: Option<String>, data_dir: PathBuf) -> Self {
        let api_host = api_host
            .map(|host| host.trim().trim_end_matches('/').to_string())
            .filter(|host| !host.is_empty())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string());

        Self { api_host, data_dir }
    }

    /// Read `API_HOST` and `GALACTIC_DATA_DIR` from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_getter(|name| env::var(name).ok())
    }

    /// Resolve settings through `getter`, falling back to the platform data directory
    pub fn from_getter(mut getter: impl FnMut(&str) -> Option<String>) -> Result<Self> {
        let data_dir = match getter(DATA_DIR_VAR).filter(|dir| !dir.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        Ok(Self::new(getter(API_HOST_VAR), data_dir))
    }

    pub fn with_api_host(self, api_host: Option<String>) -> Self {
        match api_host {
            Some(host) => Self::new(Some(host), self.data_dir),
            None => self,
        }
    }

    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn getter(vars: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_from_getter_reads_both_variables() {
        let config = AppConfig::from_getter(getter(&[
            ("API_HOST", "https://api.example.com/"),
            ("GALACTIC_DATA_DIR", "/var/lib/galactic"),
        ]))
        .unwrap();

        assert_eq!(config.api_host(), "https://api.example.com");
        assert_eq!(config.data_dir(), Path::new("/var/lib/galactic"));
    }

    #[test]
    fn test_blank_api_host_falls_back_to_default() {
        let config =
            AppConfig::from_getter(getter(&[("API_HOST", "  "), ("GALACTIC_DATA_DIR", "/data")]))
                .unwrap();

        assert_eq!(config.api_host(), DEFAULT_API_HOST);
    }

    #[test]
    fn test_with_api_host_overrides_only_when_given() {
        let config = AppConfig::new(None, PathBuf::from("/data"));

        let unchanged = config.clone().with_api_host(None);
        assert_eq!(unchanged, config);

        let overridden = config.with_api_host(Some("http://127.0.0.1:8080".to_string()));
        assert_eq!(overridden.api_host(), "http://127.0.0.1:8080");
        assert_eq!(overridden.data_dir(), Path::new("/data"));
    }
}
