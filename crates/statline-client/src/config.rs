//! Client configuration loaded from `statline.toml`.
//!
//! ```toml
//! [time_server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [system_server]
//! host = "127.0.0.1"
//! port = 8081
//! ```
//!
//! Every section and field is optional; missing values fall back to the
//! compiled-in loopback defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use statline_core::{Endpoint, DEFAULT_SYSTEM_PORT, DEFAULT_TIME_PORT};

use crate::error::{ClientError, Result};

/// Default host for both servers.
const DEFAULT_HOST: &str = "127.0.0.1";

/// One server's address in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host name or address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (1-65535).
    pub port: u16,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

impl ServerConfig {
    /// Validates the config and converts it to an [`Endpoint`].
    pub fn endpoint(&self) -> Result<Endpoint> {
        Ok(Endpoint::checked(self.host.clone(), self.port)?)
    }
}

/// Client configuration: where the two status servers live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Time server address (default `127.0.0.1:8080`).
    pub time_server: ServerConfig,

    /// System-data server address (default `127.0.0.1:8081`).
    pub system_server: ServerConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            time_server: ServerConfig {
                host: default_host(),
                port: DEFAULT_TIME_PORT,
            },
            system_server: ServerConfig {
                host: default_host(),
                port: DEFAULT_SYSTEM_PORT,
            },
        }
    }
}

impl ClientConfig {
    /// Returns the conventional config file location
    /// (`$XDG_CONFIG_HOME/statline/statline.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("statline").join("statline.toml"))
    }

    /// Loads configuration from the given file.
    ///
    /// # Errors
    ///
    /// - `ClientError::ConfigRead` when the file cannot be read
    /// - `ClientError::ConfigParse` when it is not valid TOML
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| ClientError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&contents).map_err(|e| ClientError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Loads the conventional config file when it exists, otherwise
    /// returns the defaults.
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "Loading config file");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Validated time server endpoint.
    pub fn time_endpoint(&self) -> Result<Endpoint> {
        self.time_server.endpoint()
    }

    /// Validated system server endpoint.
    pub fn system_endpoint(&self) -> Result<Endpoint> {
        self.system_server.endpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_endpoints() {
        let config = ClientConfig::default();

        assert_eq!(config.time_endpoint().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.system_endpoint().unwrap().to_string(),
            "127.0.0.1:8081"
        );
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statline.toml");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            "[time_server]\nhost = \"10.0.0.5\"\nport = 9000\n\n\
             [system_server]\nhost = \"10.0.0.5\"\nport = 9001\n"
        )
        .unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.time_endpoint().unwrap().to_string(), "10.0.0.5:9000");
        assert_eq!(
            config.system_endpoint().unwrap().to_string(),
            "10.0.0.5:9001"
        );
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statline.toml");
        fs::write(&path, "[time_server]\nport = 9000\n").unwrap();

        let config = ClientConfig::load(&path).unwrap();
        // Host defaulted within the section, other section fully defaulted.
        assert_eq!(config.time_endpoint().unwrap().to_string(), "127.0.0.1:9000");
        assert_eq!(
            config.system_endpoint().unwrap().to_string(),
            "127.0.0.1:8081"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let result = ClientConfig::load(&path);
        assert!(matches!(result, Err(ClientError::ConfigRead { .. })));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statline.toml");
        fs::write(&path, "[time_server\nport = ").unwrap();

        let result = ClientConfig::load(&path);
        assert!(matches!(result, Err(ClientError::ConfigParse { .. })));
    }

    #[test]
    fn test_port_zero_rejected_at_endpoint_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statline.toml");
        fs::write(&path, "[time_server]\nport = 0\n").unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert!(config.time_endpoint().is_err());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = ClientConfig::default();
        let rendered = toml::to_string(&config).unwrap();
        let parsed: ClientConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(config, parsed);
    }
}
