use image::RgbaImage;

use crate::compose::paste::paste_masked;
use crate::foundation::error::RadarResult;

/// Archive file name of one transparency layer, e.g. `IDR022.topography.png`.
pub fn layer_file_name(product_id: &str, layer: &str) -> String {
    format!("{product_id}.{layer}.png")
}

/// Stack `layers` onto `legend` in order, each masked by its own alpha.
///
/// Order matters: later layers occlude earlier ones where opaque. The first layer that cannot
/// be fetched aborts the whole background.
pub fn build_background<F>(
    legend: RgbaImage,
    layers: &[String],
    mut fetch_layer: F,
) -> RadarResult<RgbaImage>
where
    F: FnMut(&str) -> RadarResult<RgbaImage>,
{
    let mut base = legend;
    for layer in layers {
        tracing::debug!(layer = %layer, "downloading layer");
        let image = fetch_layer(layer)?;
        paste_masked(&mut base, &image, 0, 0);
        tracing::debug!(layer = %layer, "added layer");
    }
    tracing::info!(
        width = base.width(),
        height = base.height(),
        layers = layers.len(),
        "built background"
    );
    Ok(base)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layers.rs"]
mod tests;
