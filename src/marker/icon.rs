use image::{Rgba, RgbaImage};
use kurbo::{BezPath, Point, Rect, Shape};

use crate::compose::paste::paste_masked;
use crate::foundation::core::GeoPoint;
use crate::geo::projector::project;
use crate::geo::stations::StationMeta;

/// Default icon edge length in pixels.
pub const DEFAULT_ICON_SIZE: u32 = 20;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Render the house pictogram on a transparent `size x size` canvas.
///
/// Black roof, white walls with a 1 px black outline, black door, and a 2 px white frame so the
/// icon stays visible over dark radar returns.
pub fn render_icon(size: u32) -> RgbaImage {
    let mut icon = RgbaImage::new(size, size);
    let s = f64::from(size);

    let wall_height = (s * 0.5).trunc();
    let roof_height = (s * 0.35).trunc();
    let wall_top = s - wall_height;
    let roof_top = wall_top - roof_height;
    let bottom = s - 1.0;

    let mut roof = BezPath::new();
    roof.move_to((f64::from(size / 2) + 0.5, roof_top));
    roof.line_to((2.0, wall_top + 1.0));
    roof.line_to((s - 1.0, wall_top + 1.0));
    roof.close_path();
    fill(&mut icon, &roof, BLACK);

    // walls: outline then interior
    fill(&mut icon, &Rect::new(2.0, wall_top, s - 1.0, bottom), BLACK);
    fill(&mut icon, &Rect::new(3.0, wall_top + 1.0, s - 2.0, bottom - 1.0), WHITE);

    let door_width = (s * 0.25).trunc();
    let door_height = (s * 0.3).trunc();
    let door_left = f64::from((size - door_width as u32) / 2);
    let door_top = s - 2.0 - door_height;
    fill(
        &mut icon,
        &Rect::new(door_left, door_top, door_left + door_width + 1.0, bottom),
        BLACK,
    );

    for (x, y, px) in icon.enumerate_pixels_mut() {
        if x < 2 || y < 2 || x + 2 >= size || y + 2 >= size {
            *px = WHITE;
        }
    }

    tracing::debug!(size, "created house icon");
    icon
}

/// Fill every pixel whose center lies inside `shape`.
fn fill(icon: &mut RgbaImage, shape: &impl Shape, color: Rgba<u8>) {
    let bbox = shape.bounding_box();
    for (x, y, px) in icon.enumerate_pixels_mut() {
        let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        if bbox.contains(center) && shape.contains(center) {
            *px = color;
        }
    }
}

/// Paste `icon` centered on the projection of `target`.
///
/// Only the projected point is bounds-checked: an icon near the edge is clipped, not skipped.
/// Returns `false` (frame untouched) when the point falls outside the frame.
pub fn place(frame: &mut RgbaImage, icon: &RgbaImage, target: GeoPoint, station: StationMeta) -> bool {
    let (width, height) = frame.dimensions();
    let point = project(target, station, width, height);
    if !point.within(width, height) {
        tracing::warn!(
            lat = target.lat,
            lon = target.lon,
            "residential location is outside radar image bounds"
        );
        return false;
    }

    let x = point.x - i64::from(icon.width() / 2);
    let y = point.y - i64::from(icon.height() / 2);
    paste_masked(frame, icon, x, y);
    tracing::debug!(x = point.x, y = point.y, "added house marker");
    true
}

/// A ready-to-paste marker for one cycle.
#[derive(Clone, Debug)]
pub struct Marker {
    pub icon: RgbaImage,
    pub target: GeoPoint,
    pub station: StationMeta,
}

impl Marker {
    pub fn new(target: GeoPoint, station: StationMeta, icon_size: u32) -> Self {
        Self {
            icon: render_icon(icon_size),
            target,
            station,
        }
    }

    /// Marked copy of `frame`; the input is never modified.
    pub fn annotate(&self, frame: &RgbaImage) -> RgbaImage {
        let mut out = frame.clone();
        place(&mut out, &self.icon, self.target, self.station);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/marker/icon.rs"]
mod tests;
