//! Server configuration.

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// UTC offset, in minutes, used to bucket transcript messages by calendar
    /// date. Transported timestamps stay RFC 3339.
    #[serde(default)]
    pub display_utc_offset_minutes: i32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_upstream_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_page_size() -> u32 {
    25
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upstream_url: default_upstream_url(),
            page_size: default_page_size(),
            display_utc_offset_minutes: 0,
        }
    }
}

impl Config {
    /// Load config from a specific file path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from the default location (config/default.toml) or fall
    /// back to defaults.
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from("config/default.toml");
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// The display offset as a chrono [`chrono::FixedOffset`], clamped to a
    /// valid range.
    pub fn display_offset(&self) -> chrono::FixedOffset {
        chrono::FixedOffset::east_opt(self.display_utc_offset_minutes.clamp(-13 * 60, 13 * 60) * 60)
            .unwrap_or_else(|| chrono::FixedOffset::east_opt(0).expect("UTC offset is valid"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_file_with_partial_fields() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "port = 9001\nupstream_url = \"http://analysis:8000\"\ndisplay_utc_offset_minutes = 210"
        )
        .unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(config.upstream_url, "http://analysis:8000");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.display_offset().local_minus_utc(), 210 * 60);
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8090);
        assert_eq!(config.display_offset().local_minus_utc(), 0);
    }
}
