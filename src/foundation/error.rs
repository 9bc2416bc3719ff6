/// Convenience result type used across radarloop.
pub type RadarResult<T> = Result<T, RadarError>;

/// Top-level error taxonomy used by the pipeline and its collaborators.
#[derive(thiserror::Error, Debug)]
pub enum RadarError {
    /// Missing or invalid settings.
    #[error("config error: {0}")]
    Config(String),

    /// Archive listing or fetch failures.
    #[error("archive error: {0}")]
    Archive(String),

    /// Decode, encode or compositing failures.
    #[error("image error: {0}")]
    Image(String),

    /// Capture identifiers that do not carry a parseable timestamp.
    #[error("timestamp error: {0}")]
    Timestamp(String),

    /// No sweep image survived fetch and decode.
    #[error("no usable frames: {0}")]
    EmptyFrameSet(String),

    /// Delivery sink failures.
    #[error("delivery error: {0}")]
    Delivery(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RadarError {
    /// Build a [`RadarError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`RadarError::Archive`] value.
    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }

    /// Build a [`RadarError::Image`] value.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Build a [`RadarError::Timestamp`] value.
    pub fn timestamp(msg: impl Into<String>) -> Self {
        Self::Timestamp(msg.into())
    }

    /// Build a [`RadarError::EmptyFrameSet`] value.
    pub fn empty_frame_set(msg: impl Into<String>) -> Self {
        Self::EmptyFrameSet(msg.into())
    }

    /// Build a [`RadarError::Delivery`] value.
    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery(msg.into())
    }
}

impl From<image::ImageError> for RadarError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
