//! Service Configuration
//!
//! [`ServiceConfig`] holds everything the service needs at startup. Values
//! come from, lowest precedence first: built-in defaults, an optional JSON
//! config file, `PRODUCTS_*` environment variables, command-line flags.

use clap::Parser;
use collection_actor::IdPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Product service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// The products document (default: "products.json")
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// How created products get their ids (default: sequential)
    #[serde(default)]
    pub id_policy: IdPolicy,

    /// Capacity of the actor's request queue (default: 32)
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer: usize,

    /// Write an empty collection when the document is missing (default: true)
    #[serde(default = "default_init_if_missing")]
    pub init_if_missing: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_file() -> PathBuf {
    PathBuf::from("products.json")
}

fn default_channel_buffer() -> usize {
    32
}

fn default_init_if_missing() -> bool {
    true
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: default_data_file(),
            id_policy: IdPolicy::default(),
            channel_buffer: default_channel_buffer(),
            init_if_missing: default_init_if_missing(),
        }
    }
}

impl ServiceConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Reads a JSON config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_buffer == 0 {
            return Err(ConfigError::ZeroChannelBuffer);
        }
        Ok(())
    }
}

/// Errors raised while assembling a [`ServiceConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("channel_buffer must be at least 1")]
    ZeroChannelBuffer,
}

/// product-service - the products collection over HTTP
#[derive(Parser, Debug, Default)]
#[command(name = "product-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, env = "PRODUCTS_HOST")]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(long, env = "PRODUCTS_PORT")]
    pub port: Option<u16>,

    /// Path to the products document
    #[arg(long, env = "PRODUCTS_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Id policy: sequential, uuid or legacy-length
    #[arg(long, env = "PRODUCTS_ID_POLICY")]
    pub id_policy: Option<IdPolicy>,

    /// Capacity of the actor's request queue
    #[arg(long, env = "PRODUCTS_CHANNEL_BUFFER")]
    pub channel_buffer: Option<usize>,

    /// Fail requests instead of creating a missing document
    #[arg(long)]
    pub no_init: bool,
}

impl Cli {
    /// Layers flags and environment over the config file (or the defaults).
    pub fn into_config(self) -> Result<ServiceConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::default(),
        };
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(data_file) = self.data_file {
            config.data_file = data_file;
        }
        if let Some(id_policy) = self.id_policy {
            config.id_policy = id_policy;
        }
        if let Some(channel_buffer) = self.channel_buffer {
            config.channel_buffer = channel_buffer;
        }
        if self.no_init {
            config.init_if_missing = false;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.data_file, PathBuf::from("products.json"));
        assert_eq!(config.id_policy, IdPolicy::Sequential);
        assert_eq!(config.channel_buffer, 32);
        assert!(config.init_if_missing);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServiceConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"port": 4000, "id_policy": "legacy-length"}}"#).unwrap();

        let config = ServiceConfig::from_file(file.path()).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.id_policy, IdPolicy::LegacyLength);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.channel_buffer, 32);
    }

    #[test]
    fn test_bad_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"id_policy": "random"}}"#).unwrap();
        assert!(matches!(
            ServiceConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ServiceConfig::from_file(&dir.path().join("absent.json")),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"port": 4000, "data_file": "a.json"}}"#).unwrap();

        let cli = Cli::try_parse_from([
            "product-service",
            "--config",
            file.path().to_str().unwrap(),
            "--port",
            "5000",
            "--id-policy",
            "uuid",
            "--no-init",
        ])
        .unwrap();
        let config = cli.into_config().unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.data_file, PathBuf::from("a.json"));
        assert_eq!(config.id_policy, IdPolicy::Uuid);
        assert!(!config.init_if_missing);
    }

    #[test]
    fn test_zero_channel_buffer_is_rejected() {
        let cli = Cli {
            channel_buffer: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            cli.into_config(),
            Err(ConfigError::ZeroChannelBuffer)
        ));
    }
}
