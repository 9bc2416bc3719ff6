/// Geographic position in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Integer pixel position; may lie outside the image it was projected for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

impl PixelPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// True when the point is inside `[0, width) x [0, height)`.
    pub fn within(self, width: u32, height: u32) -> bool {
        (0..i64::from(width)).contains(&self.x) && (0..i64::from(height)).contains(&self.y)
    }
}
