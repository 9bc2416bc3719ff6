use super::*;

fn station(lat: f64, lon: f64, km_per_pixel: f64) -> StationMeta {
    StationMeta {
        center: GeoPoint::new(lat, lon),
        km_per_pixel,
    }
}

#[test]
fn icon_has_expected_parts() {
    let icon = render_icon(DEFAULT_ICON_SIZE);
    assert_eq!(icon.dimensions(), (20, 20));

    // 2 px white frame
    assert_eq!(icon.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(icon.get_pixel(1, 10).0, [255, 255, 255, 255]);
    assert_eq!(icon.get_pixel(19, 19).0, [255, 255, 255, 255]);
    // roof apex, wall, door
    assert_eq!(icon.get_pixel(10, 3).0, [0, 0, 0, 255]);
    assert_eq!(icon.get_pixel(4, 14).0, [255, 255, 255, 255]);
    assert_eq!(icon.get_pixel(9, 15).0, [0, 0, 0, 255]);
    // wall outline
    assert_eq!(icon.get_pixel(2, 14).0, [0, 0, 0, 255]);
    // sky beside the roof stays transparent
    assert_eq!(icon.get_pixel(3, 3).0[3], 0);
    assert_eq!(icon.get_pixel(2, 2).0[3], 0);
}

#[test]
fn icon_is_deterministic_and_sized() {
    assert_eq!(render_icon(32), render_icon(32));
    assert_eq!(render_icon(8).dimensions(), (8, 8));
}

#[test]
fn out_of_bounds_point_leaves_frame_unchanged() {
    let mut frame = RgbaImage::from_pixel(64, 64, Rgba([10, 20, 30, 255]));
    let before = frame.clone();
    let icon = render_icon(20);
    // ~440 km north of a 0.5 km/px radar.
    let placed = place(
        &mut frame,
        &icon,
        GeoPoint::new(-33.0, 145.0),
        station(-37.0, 145.0, 0.5),
    );
    assert!(!placed);
    assert_eq!(frame, before);
}

#[test]
fn in_bounds_point_is_centered() {
    let mut frame = RgbaImage::from_pixel(64, 64, Rgba([10, 20, 30, 255]));
    let icon = render_icon(20);
    let s = station(-37.0, 145.0, 1.0);
    assert!(place(&mut frame, &icon, s.center, s));

    // icon (0,0) lands at (32-10, 32-10)
    assert_eq!(frame.get_pixel(22, 22).0, [255, 255, 255, 255]);
    assert_eq!(frame.get_pixel(32, 25).0, [0, 0, 0, 255]);
    // transparent sky keeps the frame color
    assert_eq!(frame.get_pixel(25, 25).0, [10, 20, 30, 255]);
    assert_eq!(frame.get_pixel(10, 10).0, [10, 20, 30, 255]);
}

#[test]
fn point_near_edge_is_clipped_not_skipped() {
    let mut frame = RgbaImage::from_pixel(64, 64, Rgba([10, 20, 30, 255]));
    let icon = render_icon(20);
    // ~31 km west at 1 km/px => x = 1
    let s = station(0.0, 0.0, 1.0);
    let placed = place(&mut frame, &icon, GeoPoint::new(0.0, -0.279), s);
    assert!(placed);
    // right white frame column of the icon: x = 1 - 10 + 19 = 10
    assert_eq!(frame.get_pixel(10, 32).0, [255, 255, 255, 255]);
}

#[test]
fn annotate_returns_a_copy() {
    let frame = RgbaImage::from_pixel(64, 64, Rgba([10, 20, 30, 255]));
    let before = frame.clone();
    let s = station(-37.0, 145.0, 1.0);
    let marker = Marker::new(s.center, s, 20);

    let marked = marker.annotate(&frame);
    assert_eq!(frame, before);
    assert_ne!(marked, before);
}
