// src/error.rs
//! Error types shared across the analyzer, comparison and configuration layers.

use std::path::PathBuf;

/// Failures while opening or running a capture session.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// Microphone access refused by the user or the platform.
    #[error("microphone access denied: {0}")]
    PermissionDenied(String),

    /// No usable input device or stream configuration.
    #[error("audio input unavailable: {0}")]
    ResourceUnavailable(String),

    /// The running stream reported a failure.
    #[error("audio stream error: {0}")]
    Stream(String),
}

/// Failures of the two-track comparison.
#[derive(Debug, thiserror::Error)]
pub enum ComparisonError {
    /// One of the two tracks has not been picked yet.
    #[error("both a reference and a candidate track are required (missing {0})")]
    MissingTrack(&'static str),

    /// The picked file is not a readable audio file.
    #[error("{path:?} is not a usable audio file: {reason}")]
    InvalidPayload { path: PathBuf, reason: String },

    /// The advice delegate failed or answered with a malformed verdict.
    #[error("analysis failed: {0}")]
    DelegateFailure(String),
}

/// Invalid analysis parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("analysis resolution {0} must be a power of two between 32 and 32768")]
    InvalidResolution(usize),

    #[error("smoothing factor {0} must be in [0, 1)")]
    InvalidSmoothing(f32),
}

/// Frame composition failures. These never leave the render loop.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("canvas surface is empty ({width}x{height})")]
    EmptySurface { width: f64, height: f64 },
}

/// Configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
