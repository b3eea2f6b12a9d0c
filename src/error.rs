//! Error type shared by the engine, configuration and script loading.

use thiserror::Error;

/// Errors surfaced to callers of the sandbox.
///
/// Points or cells that fall outside the grid are not errors: they are
/// dropped and the operation succeeds.
#[derive(Debug, Error)]
pub enum SandboxError {
    /// Rotation was requested before a pivot was chosen.
    #[error("rotation requires a pivot point")]
    MissingPivot,

    /// The engine was built without the capability this operation needs.
    #[error("operation `{0}` is not enabled for this engine")]
    CapabilityDisabled(&'static str),

    /// Raw RGBA bytes do not match `width * height * 4`.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// Requested image dimensions are above `MAX_DIMENSION` or overflow.
    #[error("image of {width}x{height} pixels is too large")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SandboxError>;
