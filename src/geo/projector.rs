use crate::foundation::core::{GeoPoint, PixelPoint};
use crate::geo::stations::StationMeta;

/// Mean Earth radius in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// East and north offset of `target` from `origin`, in km.
///
/// Small-angle approximation: adequate over a radar's few hundred km, not geodesically exact.
pub fn offset_km(target: GeoPoint, origin: GeoPoint) -> (f64, f64) {
    let dlat = (target.lat - origin.lat).to_radians();
    let dlon = (target.lon - origin.lon).to_radians();
    let north = dlat * EARTH_RADIUS_KM;
    let east = dlon * EARTH_RADIUS_KM * origin.lat.to_radians().cos();
    (east, north)
}

/// Pixel position of `target` on a `width x height` image centered on the radar.
///
/// Offsets are truncated toward zero. The result is not clamped to the image.
pub fn project(target: GeoPoint, station: StationMeta, width: u32, height: u32) -> PixelPoint {
    let (east, north) = offset_km(target, station.center);
    let center_x = i64::from(width / 2);
    let center_y = i64::from(height / 2);

    let px = (east / station.km_per_pixel) as i64;
    // image rows grow downward
    let py = (north / station.km_per_pixel) as i64;

    let point = PixelPoint::new(center_x + px, center_y - py);
    tracing::debug!(
        lat = target.lat,
        lon = target.lon,
        x = point.x,
        y = point.y,
        east_km = east,
        north_km = north,
        "projected point"
    );
    point
}

#[cfg(test)]
#[path = "../../tests/unit/geo/projector.rs"]
mod tests;
