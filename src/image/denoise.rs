//! 3×3 neighborhood noise reduction, one color channel at a time.
//!
//! Only interior pixels are filtered. The one-pixel frame lacks a full
//! neighborhood and is copied through unchanged, as is every alpha sample.

use super::color::ConversionMethod;
use super::kernel::Kernel;
use super::PixelBuffer;
use crate::util::{clamp_u8, median};

pub fn denoise(buffer: &PixelBuffer, method: ConversionMethod) -> PixelBuffer {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let mut out = buffer.clone();
    if width < 3 || height < 3 {
        return out;
    }

    let src = buffer.as_bytes();
    let dst = out.as_bytes_mut();
    let mut window = [0u8; 9];

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            for channel in 0..3 {
                let mut k = 0;
                for ny in y - 1..=y + 1 {
                    for nx in x - 1..=x + 1 {
                        window[k] = src[(ny * width + nx) * 4 + channel];
                        k += 1;
                    }
                }

                let value = match method {
                    ConversionMethod::Mean => weighted(&window, &Kernel::MEAN),
                    ConversionMethod::Median => median(&mut window),
                    ConversionMethod::GaussianKernel => weighted(&window, &Kernel::GAUSSIAN),
                };
                dst[(y * width + x) * 4 + channel] = value;
            }
        }
    }
    out
}

/// Kernel-weighted sum of a row-major 3×3 window
fn weighted(window: &[u8; 9], kernel: &Kernel) -> u8 {
    let acc: f32 = window
        .iter()
        .enumerate()
        .map(|(i, &v)| f32::from(v) * kernel.weight(i as i32 % 3 - 1, i as i32 / 3 - 1))
        .sum();
    clamp_u8(acc)
}
