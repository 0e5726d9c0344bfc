use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::WikiError;

pub const DEFAULT_PORT: u16 = 8082;
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Application configuration and constants
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one `<title>.txt` file per page
    pub data_dir: Arc<PathBuf>,
    /// Directory searched for `view.html`, `edit.html` and `index.html`
    pub template_dir: Arc<PathBuf>,
    pub port: u16,
    pub host: String,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            data_dir: Arc::new(PathBuf::from("pages")),
            template_dir: Arc::new(PathBuf::from("templates")),
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
        }
    }

    /// Create configuration with custom values
    pub fn with_custom(
        data_dir: PathBuf,
        template_dir: PathBuf,
        port: Option<u16>,
        host: Option<String>,
    ) -> Self {
        Self {
            data_dir: Arc::new(data_dir),
            template_dir: Arc::new(template_dir),
            port: port.unwrap_or(DEFAULT_PORT),
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
        }
    }

    /// Read `PLAINWIKI_*` environment variables over the defaults
    pub fn from_env() -> Result<Self, WikiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WikiError> {
        let defaults = Self::new();
        let port = match lookup("PLAINWIKI_PORT") {
            Some(raw) => Some(raw.trim().parse::<u16>().map_err(|e| {
                WikiError::InvalidConfig(format!("PLAINWIKI_PORT={:?}: {}", raw, e))
            })?),
            None => None,
        };
        let config = Self::with_custom(
            lookup("PLAINWIKI_DATA_DIR").map(PathBuf::from).unwrap_or_else(|| defaults.data_dir.as_ref().clone()),
            lookup("PLAINWIKI_TEMPLATE_DIR").map(PathBuf::from).unwrap_or_else(|| defaults.template_dir.as_ref().clone()),
            port,
            lookup("PLAINWIKI_HOST"),
        );
        config.socket_addr()?;
        Ok(config)
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, WikiError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| WikiError::InvalidConfig(format!("host {:?}: {}", self.host, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8082);
        assert_eq!(config.data_dir.as_ref(), &PathBuf::from("pages"));
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8082");
    }

    #[test]
    fn environment_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PLAINWIKI_PORT", "9000"),
            ("PLAINWIKI_HOST", "127.0.0.1"),
            ("PLAINWIKI_DATA_DIR", "/srv/wiki"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:9000");
        assert_eq!(config.data_dir.as_ref(), &PathBuf::from("/srv/wiki"));
        assert_eq!(config.template_dir.as_ref(), &PathBuf::from("templates"));
    }

    #[test]
    fn bad_values_are_rejected() {
        let port = Config::from_lookup(lookup_from(&[("PLAINWIKI_PORT", "http")]));
        assert!(matches!(port, Err(WikiError::InvalidConfig(_))));
        let host = Config::from_lookup(lookup_from(&[("PLAINWIKI_HOST", "not a host")]));
        assert!(matches!(host, Err(WikiError::InvalidConfig(_))));
    }
}
