//! Flat-earth projection from latitude/longitude onto radar image pixels.

pub mod projector;
pub mod stations;
