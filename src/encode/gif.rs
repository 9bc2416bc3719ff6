use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::foundation::error::{RadarError, RadarResult};

// NeuQuant speed: 1 is best quality, 30 fastest; 10 is the encoder's recommended balance.
const QUANTIZE_SPEED: i32 = 10;

/// Ordered frames with a uniform per-frame delay and loop count.
#[derive(Clone, Debug)]
pub struct Animation {
    frames: Vec<RgbaImage>,
    pub duration_ms: u32,
    /// `0` loops forever.
    pub loop_count: u16,
}

impl Animation {
    /// Assemble `frames` in the given order. At least one frame is required.
    pub fn assemble(frames: Vec<RgbaImage>, duration_ms: u32, loop_count: u16) -> RadarResult<Self> {
        if frames.is_empty() {
            return Err(RadarError::empty_frame_set(
                "an animation needs at least one frame",
            ));
        }
        Ok(Self {
            frames,
            duration_ms,
            loop_count,
        })
    }

    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn repeat(&self) -> Repeat {
        match self.loop_count {
            0 => Repeat::Infinite,
            n => Repeat::Finite(n),
        }
    }

    /// Encode as an animated GIF.
    pub fn encode_gif(&self) -> RadarResult<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut buf, QUANTIZE_SPEED);
            encoder.set_repeat(self.repeat())?;
            let delay = Delay::from_numer_denom_ms(self.duration_ms, 1);
            for image in &self.frames {
                encoder.encode_frame(Frame::from_parts(image.clone(), 0, 0, delay))?;
            }
        }
        Ok(buf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
