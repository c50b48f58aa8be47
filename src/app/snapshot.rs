// src/app/snapshot.rs
//! Writes the retained analyzer scene to an image file.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use image::DynamicImage;
use tracing::info;

use crate::render::{rasterize, Scene};

/// Rasterise `scene` into `dir`. The extension picks the encoder.
pub fn save_snapshot(scene: &Scene, dir: &Path, extension: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create snapshot directory {dir:?}"))?;

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let stem: String = scene
        .id()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect();
    let path = dir.join(format!("{stem}-{stamp}.{extension}"));

    let pixels = rasterize(scene);
    let written = match extension.to_ascii_lowercase().as_str() {
        // JPEG has no alpha channel
        "jpg" | "jpeg" => DynamicImage::ImageRgba8(pixels).to_rgb8().save(&path),
        _ => pixels.save(&path),
    };
    written.with_context(|| format!("failed to write snapshot {path:?}"))?;

    info!(?path, "snapshot saved");
    Ok(path)
}
