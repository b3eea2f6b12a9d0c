//! Bitmap path: RGBA buffers in, RGBA buffers out.

pub mod color;
pub mod denoise;
pub mod edges;
pub mod kernel;
mod pixel_buffer;
mod plane;

pub use color::{binarize, expand_to_rgb, reduce_to_gray, ConversionMethod, DEFAULT_BINARIZE_THRESHOLD};
pub use denoise::denoise;
pub use edges::{detect_edges, CannyParams, EdgeMethod, Hysteresis};
pub use kernel::{apply_kernel, Kernel};
pub use pixel_buffer::{PixelBuffer, MAX_DIMENSION};
pub use plane::GrayPlane;

use serde::{Deserialize, Serialize};

/// Whole-buffer color operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Grayscale,
    Binarize,
    Denoise,
    ExpandToRgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessParams {
    pub method: ConversionMethod,
    /// Only used by [`Operation::Binarize`]
    pub threshold: u8,
}

impl Default for ProcessParams {
    fn default() -> Self {
        Self {
            method: ConversionMethod::Mean,
            threshold: DEFAULT_BINARIZE_THRESHOLD,
        }
    }
}

pub fn process_image(buffer: &PixelBuffer, operation: Operation, params: &ProcessParams) -> PixelBuffer {
    match operation {
        Operation::Grayscale => reduce_to_gray(buffer, params.method),
        Operation::Binarize => binarize(buffer, params.method, params.threshold),
        Operation::Denoise => denoise(buffer, params.method),
        Operation::ExpandToRgb => expand_to_rgb(buffer),
    }
}
