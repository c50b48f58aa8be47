// src/compare/payload.rs
//! Audio files handed to the comparison delegate.

use std::path::{Path, PathBuf};

use lofty::file::AudioFile;
use lofty::probe::Probe;
use tracing::debug;

use crate::error::ComparisonError;
use crate::fs::{detect_file_type, FileCategory};

/// Tag-level properties of a track, when the container exposes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackProperties {
    pub duration_secs: u64,
    pub sample_rate: Option<u32>,
    pub channels: Option<u8>,
}

/// A validated audio file plus what we could learn about it.
///
/// Only the location travels; the delegate reads the file itself.
#[derive(Debug, Clone)]
pub struct AudioPayload {
    pub path: PathBuf,
    pub mime: String,
    pub size_bytes: u64,
    pub properties: Option<TrackProperties>,
}

impl AudioPayload {
    /// Read `path`, insisting that it is audio.
    pub fn load(path: &Path) -> Result<Self, ComparisonError> {
        let invalid = |reason: String| ComparisonError::InvalidPayload {
            path: path.to_path_buf(),
            reason,
        };

        let kind = detect_file_type(path).map_err(|e| invalid(e.to_string()))?;
        if kind.category != FileCategory::Audio {
            return Err(invalid(format!("detected {} ({})", kind.category, kind.mime)));
        }
        let size_bytes = std::fs::metadata(path)
            .map_err(|e| invalid(e.to_string()))?
            .len();
        if size_bytes == 0 {
            return Err(invalid("file is empty".to_string()));
        }

        let properties = read_properties(path);
        debug!(?path, mime = %kind.mime, size = size_bytes, "loaded comparison track");

        Ok(Self {
            path: path.to_path_buf(),
            mime: kind.mime,
            size_bytes,
            properties,
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// One-line description for the comparison panel.
    pub fn summary(&self) -> String {
        match self.properties {
            Some(TrackProperties {
                duration_secs,
                sample_rate,
                channels,
            }) => {
                let rate = sample_rate.map_or("?".to_string(), |r| r.to_string());
                let ch = channels.map_or("?".to_string(), |c| c.to_string());
                format!(
                    "{} ({}:{:02}, {} Hz, {} ch)",
                    self.file_name(),
                    duration_secs / 60,
                    duration_secs % 60,
                    rate,
                    ch
                )
            }
            None => format!("{} ({})", self.file_name(), self.mime),
        }
    }
}

fn read_properties(path: &Path) -> Option<TrackProperties> {
    let tagged = Probe::open(path).ok()?.read().ok()?;
    let props = tagged.properties();
    Some(TrackProperties {
        duration_secs: props.duration().as_secs(),
        sample_rate: props.sample_rate(),
        channels: props.channels(),
    })
}
