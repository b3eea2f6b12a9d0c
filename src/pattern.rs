//! Synthetic test images for the image page when no decoded file is at hand.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::image::PixelBuffer;
use crate::util::Rng;

// SMPTE color bar colors (75% intensity)
const BARS: [(u8, u8, u8); 7] = [
    (191, 191, 191),
    (191, 191, 0),
    (0, 191, 191),
    (0, 191, 0),
    (191, 0, 191),
    (191, 0, 0),
    (0, 0, 191),
];

const CHECKER_CELL: u32 = 8;
const NOISE_SEED: u64 = 0x2389_5eed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PatternKind {
    /// Uniform mid gray
    Flat,
    #[default]
    Checker,
    /// Bright disc on a dark background
    Disc,
    /// Seven vertical color bars
    Bars,
    /// Gray with per-pixel speckle
    Noise,
}

impl PatternKind {
    /// Resolve a textual selector. Unknown names fall back to the checkerboard.
    pub fn from_selector(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "flat" => Self::Flat,
            "checker" | "checkerboard" => Self::Checker,
            "disc" | "circle" => Self::Disc,
            "bars" => Self::Bars,
            "noise" => Self::Noise,
            other => {
                log::warn!("unknown pattern {:?}, falling back to checker", other);
                Self::Checker
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Checker => "checker",
            Self::Disc => "disc",
            Self::Bars => "bars",
            Self::Noise => "noise",
        }
    }
}

impl From<String> for PatternKind {
    fn from(name: String) -> Self {
        Self::from_selector(&name)
    }
}

impl From<PatternKind> for String {
    fn from(kind: PatternKind) -> Self {
        kind.as_str().to_owned()
    }
}

/// Render an opaque `width` x `height` pattern. Fails with `ImageTooLarge`
/// when a side exceeds [`MAX_DIMENSION`](crate::image::MAX_DIMENSION).
pub fn generate(kind: PatternKind, width: u32, height: u32) -> Result<PixelBuffer> {
    let buffer = match kind {
        PatternKind::Flat => PixelBuffer::solid(width, height, 128, 128, 128, 255)?,
        PatternKind::Checker => {
            let mut buffer = PixelBuffer::solid(width, height, 32, 32, 32, 255)?;
            for cy in (0..height).step_by(CHECKER_CELL as usize) {
                for cx in (0..width).step_by(CHECKER_CELL as usize) {
                    if (cx / CHECKER_CELL + cy / CHECKER_CELL) % 2 == 1 {
                        buffer.fill_rect(cx as i32, cy as i32, CHECKER_CELL, CHECKER_CELL, 224, 224, 224);
                    }
                }
            }
            buffer
        },
        PatternKind::Disc => {
            let mut buffer = PixelBuffer::solid(width, height, 16, 16, 16, 255)?;
            let radius = (width.min(height) / 3) as i32;
            buffer.fill_circle(width as i32 / 2, height as i32 / 2, radius, 240, 240, 240);
            buffer
        },
        PatternKind::Bars => {
            let mut buffer = PixelBuffer::solid(width, height, 0, 0, 0, 255)?;
            let bar_width = (width / BARS.len() as u32).max(1);
            for (i, &(r, g, b)) in BARS.iter().enumerate() {
                let x = i as u32 * bar_width;
                // Last bar absorbs the remainder
                let w = if i == BARS.len() - 1 {
                    width.saturating_sub(x)
                } else {
                    bar_width
                };
                buffer.fill_rect(x as i32, 0, w, height, r, g, b);
            }
            buffer
        },
        PatternKind::Noise => {
            let mut rng = Rng::new(NOISE_SEED);
            let mut buffer = PixelBuffer::solid(width, height, 128, 128, 128, 255)?;
            for y in 0..height as i32 {
                for x in 0..width as i32 {
                    if rng.next_f32() < 0.1 {
                        let v = rng.next_u8();
                        buffer.set_pixel(x, y, v, v, v);
                    }
                }
            }
            buffer
        },
    };
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_have_requested_size_and_are_opaque() {
        for kind in [
            PatternKind::Flat,
            PatternKind::Checker,
            PatternKind::Disc,
            PatternKind::Bars,
            PatternKind::Noise,
        ] {
            let buffer = generate(kind, 20, 13).unwrap();
            assert_eq!((buffer.width(), buffer.height()), (20, 13));
            assert!(buffer.as_bytes().chunks_exact(4).all(|px| px[3] == 255), "{:?}", kind);
        }
    }

    #[test]
    fn test_checker_alternates() {
        let buffer = generate(PatternKind::Checker, 16, 16).unwrap();
        assert_eq!(buffer.get_pixel_rgba(0, 0), Some((32, 32, 32, 255)));
        assert_eq!(buffer.get_pixel_rgba(8, 0), Some((224, 224, 224, 255)));
        assert_eq!(buffer.get_pixel_rgba(8, 8), Some((32, 32, 32, 255)));
    }

    #[test]
    fn test_bars_cover_full_width() {
        let buffer = generate(PatternKind::Bars, 30, 4).unwrap();
        assert_eq!(buffer.get_pixel_rgba(0, 0), Some((191, 191, 191, 255)));
        assert_eq!(buffer.get_pixel_rgba(29, 3), Some((0, 0, 191, 255)));
    }

    #[test]
    fn test_noise_is_deterministic() {
        assert_eq!(
            generate(PatternKind::Noise, 12, 12).unwrap(),
            generate(PatternKind::Noise, 12, 12).unwrap()
        );
    }

    #[test]
    fn test_huge_patterns_are_refused() {
        for (w, h) in [(u32::MAX, u32::MAX), (100_000, 2), (2, 100_000)] {
            assert!(matches!(
                generate(PatternKind::Disc, w, h),
                Err(crate::error::SandboxError::ImageTooLarge { .. })
            ));
        }
    }

    #[test]
    fn test_unknown_pattern_falls_back() {
        assert_eq!(PatternKind::from_selector("plaid"), PatternKind::Checker);
        assert_eq!(PatternKind::from_selector(" Bars "), PatternKind::Bars);
    }
}
