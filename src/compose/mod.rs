//! Layer and frame compositing.

pub mod frames;
pub mod layers;
pub mod paste;
