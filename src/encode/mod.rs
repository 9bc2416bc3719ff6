//! Output encoders for persisted artifacts.

/// Animated GIF assembly.
pub mod gif;
/// Single-frame PNG encoding.
pub mod png;
