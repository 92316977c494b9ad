mod load_style;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use crate::binlog::PAYLOAD_BUFFER_SIZE;
use crate::config::load_style::LoadStyle;

use crate::err::ReError;

#[derive(Debug, Serialize, Deserialize)]
pub struct FConfig {
    config: RepConfig,

    load_style: LoadStyle,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RepConfig {
    app_name: String,

    pub binlog: BinlogConfig,
    pub base: BaseConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BaseConfig {
    /// log output directory
    log_dir: Option<String>,
}

/// Connection + binlog-replication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinlogConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,

    /// buffer size used when reading the network binlog stream
    pub payload_buffer_size: usize,

    /// binlog file name, e.g. mysql-bin.000005
    pub file: Option<String>,

    /// starting position within `file`
    pub position: Option<u32>,

    /// local filesystem path to a binlog file, when reading offline
    pub binlog_path: Option<String>,
}

impl Default for FConfig {
    fn default() -> Self {
        FConfig {
            config: RepConfig::default(),
            load_style: LoadStyle::DEFAULT,
        }
    }
}

impl Default for RepConfig {
    fn default() -> Self {
        RepConfig {
            app_name: String::from(""),
            base: BaseConfig::default(),
            binlog: BinlogConfig::default(),
        }
    }
}

impl Default for BinlogConfig {
    fn default() -> Self {
        BinlogConfig {
            host: "127.0.0.1".to_string(),
            port: 3306,
            username: "root".to_string(),
            password: "".to_string(),
            payload_buffer_size: PAYLOAD_BUFFER_SIZE,
            file: None,
            position: Some(4),
            binlog_path: None,
        }
    }
}

impl Default for BaseConfig {
    fn default() -> Self {
        BaseConfig {
            log_dir: Some(String::from("/tmp/mysql-cdc")),
        }
    }
}

impl FConfig {
    pub fn new(c: RepConfig) -> Self {
        FConfig {
            config: c,
            load_style: LoadStyle::YAML,
        }
    }

    pub fn get_config(self) -> RepConfig {
        self.config
    }

    pub fn get_load_style(&self) -> LoadStyle {
        self.load_style.clone()
    }
}

impl BaseConfig {
    pub fn get_log_dir(&self) -> Option<String> {
        self.log_dir.clone()
    }
}

impl BinlogConfig {
    pub fn get_host(&self) -> String {
        self.host.clone()
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }
}

/// Loads a TOML-formatted configuration file from `path`.
pub fn read_config<P: AsRef<Path>>(path: P) -> Result<RepConfig, ReError> {
    let mut file = File::open(path.as_ref())?;
    let mut s = String::new();

    file.read_to_string(&mut s)?;
    toml::from_str(s.as_str()).map_err(|e| ReError::ConfigFileParseErr(e.to_string()))
}

#[cfg(test)]
mod test {
    use super::BinlogConfig;

    #[test]
    fn binlog_config_accessors_match_fields() {
        let mut cfg = BinlogConfig::default();
        cfg.host = "10.0.0.5".to_string();
        cfg.port = 3307;
        assert_eq!(cfg.get_host(), "10.0.0.5");
        assert_eq!(cfg.get_port(), 3307);
    }
}
