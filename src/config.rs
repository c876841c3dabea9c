use crate::datasets::dataset::DEFAULT_TIME_COLUMN;
use crate::datasets::loader::FileFormat;
use crate::stations::metadata_index::{DEFAULT_LOCATION_COLUMN, DEFAULT_STATION_COLUMN};
use log::info;
use serde::Deserialize;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse TOML configuration '{0}'")]
    Parse(PathBuf, #[source] toml::de::Error),
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    /// Directory with the per-pollutant datasets.
    pub dir: PathBuf,
    pub format: FileFormat,
    pub time_column: String,
    /// Resolved against `dir` unless absolute.
    pub metadata_file: PathBuf,
    pub station_column: String,
    pub location_column: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            format: FileFormat::NetCdf,
            time_column: DEFAULT_TIME_COLUMN.to_string(),
            metadata_file: PathBuf::from("metadata.nc"),
            station_column: DEFAULT_STATION_COLUMN.to_string(),
            location_column: DEFAULT_LOCATION_COLUMN.to_string(),
        }
    }
}

impl DataConfig {
    pub fn metadata_path(&self) -> PathBuf {
        self.dir.join(&self.metadata_file)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Pre-rendered station maps, served under `/maps`.
    pub maps_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            maps_dir: PathBuf::from("static/maps"),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Loads `path` if given; otherwise `config.toml` in the working directory when it
    /// exists, and built-in defaults when it does not.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load_from_file(default_path)
                } else {
                    info!("No {} found, using default configuration", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() -> Result<(), Box<dyn Error>> {
        let config: AppConfig = toml::from_str("")?;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.data.time_column, "Data");
        assert_eq!(config.data.format, FileFormat::NetCdf);
        assert_eq!(config.data.metadata_path(), Path::new("data/metadata.nc"));
        assert_eq!(config.server.socket_addr(), "0.0.0.0:5000".parse::<SocketAddr>()?);
        Ok(())
    }

    #[test]
    fn test_partial_config() -> Result<(), Box<dyn Error>> {
        let config: AppConfig = toml::from_str(
            r#"
            [data]
            dir = "/srv/smog"
            format = "csv"
            metadata_file = "/etc/smog/stations.csv"

            [server]
            host = "127.0.0.1"
            port = 8080
            "#,
        )?;
        assert_eq!(config.data.format, FileFormat::Csv);
        assert_eq!(config.data.station_column, "kod_stacji");
        assert_eq!(config.data.metadata_path(), Path::new("/etc/smog/stations.csv"));
        assert_eq!(config.server.socket_addr(), "127.0.0.1:8080".parse::<SocketAddr>()?);
        assert_eq!(config.server.maps_dir, Path::new("static/maps"));
        Ok(())
    }

    #[test]
    fn test_load_errors() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            AppConfig::resolve(Some(&missing)),
            Err(ConfigError::Read(..))
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[server]\nport = \"not a number\"\n")?;
        assert!(matches!(
            AppConfig::load_from_file(&broken),
            Err(ConfigError::Parse(..))
        ));
        Ok(())
    }
}
