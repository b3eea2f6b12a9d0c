//! Grayscale reduction, binarization and gray-to-RGB re-tagging.
//!
//! Every function reads the untouched input and writes a new buffer, so the
//! Gaussian variant always samples original neighbors rather than pixels that
//! were already reduced earlier in the same pass.

use serde::{Deserialize, Serialize};

use super::kernel::{apply_kernel, Kernel};
use super::PixelBuffer;
use crate::util::{clamp_u8, median};

/// Default cut-off for [`binarize`].
pub const DEFAULT_BINARIZE_THRESHOLD: u8 = 128;

/// How three color channels collapse into one gray value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConversionMethod {
    /// (R + G + B) / 3
    #[default]
    Mean,
    /// Middle of the sorted channels
    Median,
    /// 3×3 Gaussian-weighted neighborhood, then the mean of the channel sums
    GaussianKernel,
}

impl ConversionMethod {
    /// Resolve a textual selector. Unknown names fall back to [`ConversionMethod::Mean`].
    pub fn from_selector(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "mean" | "average" => Self::Mean,
            "median" => Self::Median,
            "gaussian" | "gaussiankernel" | "gaussian_kernel" => Self::GaussianKernel,
            other => {
                log::warn!("unknown conversion method {:?}, falling back to mean", other);
                Self::Mean
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::GaussianKernel => "gaussian",
        }
    }
}

impl From<String> for ConversionMethod {
    fn from(name: String) -> Self {
        Self::from_selector(&name)
    }
}

impl From<ConversionMethod> for String {
    fn from(method: ConversionMethod) -> Self {
        method.as_str().to_owned()
    }
}

/// Gray value of the pixel whose first byte is at `index`.
fn gray_at(data: &[u8], index: usize, width: usize, method: ConversionMethod) -> u8 {
    match method {
        ConversionMethod::Mean => {
            let sum = u16::from(data[index]) + u16::from(data[index + 1]) + u16::from(data[index + 2]);
            ((sum + 1) / 3) as u8
        },
        ConversionMethod::Median => median(&mut [data[index], data[index + 1], data[index + 2]]),
        ConversionMethod::GaussianKernel => {
            let [r, g, b] = apply_kernel(data, index, width, &Kernel::GAUSSIAN);
            clamp_u8((r + g + b) / 3.0)
        },
    }
}

/// Apply `f(gray)` to every pixel and replicate the result into R, G and B.
/// Alpha is copied through.
fn map_gray(buffer: &PixelBuffer, method: ConversionMethod, f: impl Fn(u8) -> u8) -> PixelBuffer {
    let src = buffer.as_bytes();
    let width = buffer.width() as usize;
    let mut out = buffer.clone();
    for (i, px) in out.as_bytes_mut().chunks_exact_mut(4).enumerate() {
        let v = f(gray_at(src, i * 4, width, method));
        px[0] = v;
        px[1] = v;
        px[2] = v;
    }
    out
}

/// Reduce every pixel to a single gray value written into R, G and B.
pub fn reduce_to_gray(buffer: &PixelBuffer, method: ConversionMethod) -> PixelBuffer {
    map_gray(buffer, method, |v| v)
}

/// 255 where the gray value exceeds `threshold`, 0 elsewhere.
pub fn binarize(buffer: &PixelBuffer, method: ConversionMethod, threshold: u8) -> PixelBuffer {
    map_gray(buffer, method, |v| if v > threshold { 255 } else { 0 })
}

/// Treat R as the gray channel: copy it into G and B and force alpha opaque.
pub fn expand_to_rgb(buffer: &PixelBuffer) -> PixelBuffer {
    let mut out = buffer.clone();
    for px in out.as_bytes_mut().chunks_exact_mut(4) {
        let v = px[0];
        px.copy_from_slice(&[v, v, v, 255]);
    }
    out
}
