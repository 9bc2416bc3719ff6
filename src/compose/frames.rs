use image::RgbaImage;

use crate::compose::paste::paste_masked;
use crate::foundation::error::{RadarError, RadarResult};
use crate::timestamp::codec::sort_key;

/// Most recent sweeps kept per cycle.
pub const MAX_FRAMES: usize = 5;

const SWEEP_SUFFIX: &str = ".png";

/// One composited still, numbered from 1 in chronological order.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub index: usize,
    pub identifier: String,
    pub image: RgbaImage,
}

impl Frame {
    /// Persisted name, `image_<n>.png`.
    pub fn file_name(&self) -> String {
        format!("image_{}.png", self.index)
    }
}

/// Pick the sweeps to animate: ids of `product_id` ending in `.png`, oldest first, at most the
/// [`MAX_FRAMES`] newest. Equal stamps keep their listing order.
pub fn select_frames(identifiers: &[String], product_id: &str) -> Vec<String> {
    let mut candidates: Vec<&String> = identifiers
        .iter()
        .filter(|id| id.starts_with(product_id) && id.ends_with(SWEEP_SUFFIX))
        .collect();
    candidates.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));

    let skip = candidates.len().saturating_sub(MAX_FRAMES);
    let selected: Vec<String> = candidates.into_iter().skip(skip).cloned().collect();

    tracing::info!(
        total = identifiers.len(),
        selected = ?selected.iter().map(|id| sort_key(id)).collect::<Vec<_>>(),
        "selected most recent radar files"
    );
    selected
}

/// Composite one sweep onto a private copy of `background`.
pub fn build_frame(background: &RgbaImage, sweep: &RgbaImage) -> RgbaImage {
    let mut frame = background.clone();
    paste_masked(&mut frame, sweep, 0, 0);
    frame
}

/// Build a frame for every selected id, skipping any that cannot be fetched or decoded.
///
/// Fails only when no frame survives.
pub fn build_frames<F>(
    background: &RgbaImage,
    selected: &[String],
    mut fetch_sweep: F,
) -> RadarResult<Vec<Frame>>
where
    F: FnMut(&str) -> RadarResult<RgbaImage>,
{
    let mut frames = Vec::with_capacity(selected.len());
    for identifier in selected {
        tracing::debug!(identifier = %identifier, "processing sweep");
        match fetch_sweep(identifier) {
            Ok(sweep) => {
                frames.push(Frame {
                    index: frames.len() + 1,
                    identifier: identifier.clone(),
                    image: build_frame(background, &sweep),
                });
            }
            Err(err) => {
                tracing::error!(identifier = %identifier, error = %err, "error downloading sweep");
            }
        }
    }

    if frames.is_empty() {
        return Err(RadarError::empty_frame_set(format!(
            "none of {} selected sweeps could be composited",
            selected.len()
        )));
    }
    Ok(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/frames.rs"]
mod tests;
