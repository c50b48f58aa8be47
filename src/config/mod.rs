// src/config/mod.rs
//! User configuration loaded from `<config_dir>/spectral-lab/config.toml`.
//!
//! Every field has a default, so a missing file or a partial file is fine.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

const APP_DIR: &str = "spectral-lab";
const CONFIG_FILE: &str = "config.toml";

/// Extensions the snapshot writer knows how to encode.
pub const SNAPSHOT_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log: LogSettings,
    pub display: DisplaySettings,
    pub session: SessionSettings,
    pub advisor: AdvisorSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter directive; `RUST_LOG` overrides it
    pub level: String,
    pub directory: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_DIR)
                .join("logs"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub frame_interval_ms: u64,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub snapshot_dir: PathBuf,
    pub snapshot_extension: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            canvas_width: 800,
            canvas_height: 300,
            snapshot_dir: dirs::picture_dir().unwrap_or_else(|| PathBuf::from(".")),
            snapshot_extension: "png".to_string(),
        }
    }
}

/// Selections restored at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub genre: Option<String>,
    pub subgenre: Option<String>,
    pub instrument: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorSettings {
    /// Program and leading arguments; empty disables comparisons
    pub command: Vec<String>,
    /// Replaces the built-in instruction when set
    pub instruction: Option<String>,
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from the platform config directory, or defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(?path, "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.display;
        if d.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "display.frame_interval_ms must be greater than zero".into(),
            ));
        }
        if d.canvas_width == 0 || d.canvas_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "display canvas must be non-empty, got {}x{}",
                d.canvas_width, d.canvas_height
            )));
        }
        let ext = d.snapshot_extension.to_ascii_lowercase();
        if !SNAPSHOT_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "display.snapshot_extension {:?} is not one of {:?}",
                d.snapshot_extension, SNAPSHOT_EXTENSIONS
            )));
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.display.frame_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        assert_eq!((config.display.canvas_width, config.display.canvas_height), (800, 300));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let (_dir, path) = write(
            r#"
            [session]
            genre = "Jazz"
            subgenre = "Bebop"

            [advisor]
            command = ["advise", "--json"]
            "#,
        );
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.session.genre.as_deref(), Some("Jazz"));
        assert_eq!(config.session.instrument, None);
        assert_eq!(config.advisor.command, ["advise", "--json"]);
        assert_eq!(config.display.snapshot_extension, "png");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn zero_interval_is_rejected() {
        let (_dir, path) = write("[display]\nframe_interval_ms = 0\n");
        assert!(matches!(AppConfig::load_from(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn empty_canvas_is_rejected() {
        let (_dir, path) = write("[display]\ncanvas_height = 0\n");
        assert!(matches!(AppConfig::load_from(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_snapshot_format_is_rejected() {
        let (_dir, path) = write("[display]\nsnapshot_extension = \"gif\"\n");
        assert!(matches!(AppConfig::load_from(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let (_dir, path) = write("[display\nframe_interval_ms = ");
        assert!(matches!(AppConfig::load_from(&path), Err(ConfigError::Parse { .. })));
    }
}
