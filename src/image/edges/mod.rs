//! Edge detection: single-pass Sobel/Prewitt gradients and a four-stage Canny
//! pipeline (blur, gradient, non-maximum suppression, hysteresis).
//!
//! Every method starts from the mean-of-RGB gray plane and returns a new
//! opaque buffer with R = G = B = detected value. The input is never touched.

mod grad;
mod hysteresis;
mod nms;

pub use grad::{compute_gradient, gaussian_blur, GradientField};
pub use hysteresis::{hysteresis, Hysteresis, EDGE};
pub use nms::{non_maximum_suppression, Orientation};

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::kernel::Kernel;
use super::{GrayPlane, PixelBuffer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EdgeMethod {
    #[default]
    Sobel,
    Prewitt,
    Canny,
}

impl EdgeMethod {
    /// Resolve a textual selector. Unknown names fall back to [`EdgeMethod::Sobel`].
    pub fn from_selector(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sobel" => Self::Sobel,
            "prewitt" => Self::Prewitt,
            "canny" => Self::Canny,
            other => {
                log::warn!("unknown edge method {:?}, falling back to sobel", other);
                Self::Sobel
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sobel => "sobel",
            Self::Prewitt => "prewitt",
            Self::Canny => "canny",
        }
    }
}

impl From<String> for EdgeMethod {
    fn from(name: String) -> Self {
        Self::from_selector(&name)
    }
}

impl From<EdgeMethod> for String {
    fn from(method: EdgeMethod) -> Self {
        method.as_str().to_owned()
    }
}

/// Tuning for the Canny hysteresis stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    /// Low threshold as a fraction of the strongest suppressed magnitude
    pub low_ratio: f32,
    /// High threshold as a fraction of the strongest suppressed magnitude
    pub high_ratio: f32,
    pub hysteresis: Hysteresis,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low_ratio: 0.1,
            high_ratio: 0.3,
            hysteresis: Hysteresis::SinglePass,
        }
    }
}

/// Run the selected edge detector over `buffer`.
pub fn detect_edges(buffer: &PixelBuffer, method: EdgeMethod, params: &CannyParams) -> PixelBuffer {
    let gray = GrayPlane::from_rgb_mean(buffer);
    let plane = match method {
        EdgeMethod::Sobel => compute_gradient(&gray, &Kernel::SOBEL_X, &Kernel::SOBEL_Y).magnitude_plane(),
        EdgeMethod::Prewitt => {
            compute_gradient(&gray, &Kernel::PREWITT_X, &Kernel::PREWITT_Y).magnitude_plane()
        },
        EdgeMethod::Canny => canny(&gray, params),
    };
    plane.to_rgba()
}

/// Full Canny pipeline over a gray plane. Output values are 0 or 255.
pub fn canny(gray: &GrayPlane, params: &CannyParams) -> GrayPlane {
    let start = Instant::now();
    let blurred = gaussian_blur(gray);
    let blur_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let field = compute_gradient(&blurred, &Kernel::SOBEL_X, &Kernel::SOBEL_Y);
    let gradient_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let suppressed = non_maximum_suppression(&field);
    let nms_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let edges = hysteresis(&suppressed, params.low_ratio, params.high_ratio, params.hysteresis);
    let hysteresis_ms = start.elapsed().as_secs_f64() * 1000.0;

    log::debug!(
        "canny {}x{}: blur {:.3}ms gradient {:.3}ms nms {:.3}ms hysteresis {:.3}ms",
        gray.width,
        gray.height,
        blur_ms,
        gradient_ms,
        nms_ms,
        hysteresis_ms
    );
    edges
}
