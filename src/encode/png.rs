use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::foundation::error::RadarResult;

/// Encode an RGBA frame as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> RadarResult<Vec<u8>> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}
