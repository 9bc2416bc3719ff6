use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{RadarError, RadarResult};

/// Decode encoded image bytes into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> RadarResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Load an image file from disk into straight RGBA8.
pub fn load_image(path: &Path) -> RadarResult<RgbaImage> {
    if !path.is_file() {
        return Err(RadarError::image(format!(
            "image not found at '{}'",
            path.display()
        )));
    }
    let dyn_img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    Ok(dyn_img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
