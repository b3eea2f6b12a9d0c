//! Smoothing and 3×3 gradients over a gray plane.
//!
//! Only interior pixels are convolved; the outermost frame never needs a
//! bounds check. Gradient magnitudes are clamped to 0..=255 so they can be
//! displayed directly, and directions come from `atan2(gy, gx)`.

use crate::image::kernel::{convolve_at, Kernel};
use crate::image::GrayPlane;
use crate::util::clamp_u8;

/// Per-pixel gradient magnitude and direction. Border entries are zero.
#[derive(Clone, Debug)]
pub struct GradientField {
    pub width: usize,
    pub height: usize,
    /// Euclidean magnitude `sqrt(gx^2 + gy^2)`, rounded and clamped to 255
    pub magnitude: Vec<u8>,
    /// Gradient direction in radians, range [-π, π]
    pub direction: Vec<f32>,
}

impl GradientField {
    pub fn magnitude_plane(&self) -> GrayPlane {
        GrayPlane {
            width: self.width,
            height: self.height,
            data: self.magnitude.clone(),
        }
    }
}

/// Gaussian 3×3 smoothing of interior pixels; the border is copied as is.
pub fn gaussian_blur(plane: &GrayPlane) -> GrayPlane {
    let mut out = plane.clone();
    if !plane.has_interior() {
        return out;
    }
    let w = plane.width;
    for y in 1..plane.height - 1 {
        for x in 1..w - 1 {
            out.data[y * w + x] = clamp_u8(convolve_at(&plane.data, w, x, y, &Kernel::GAUSSIAN));
        }
    }
    out
}

/// Convolve an X/Y kernel pair over the interior of `plane`.
pub fn compute_gradient(plane: &GrayPlane, kernel_x: &Kernel, kernel_y: &Kernel) -> GradientField {
    let (w, h) = (plane.width, plane.height);
    let mut field = GradientField {
        width: w,
        height: h,
        magnitude: vec![0; w * h],
        direction: vec![0.0; w * h],
    };
    if !plane.has_interior() {
        return field;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let gx = convolve_at(&plane.data, w, x, y, kernel_x);
            let gy = convolve_at(&plane.data, w, x, y, kernel_y);
            let idx = y * w + x;
            field.magnitude[idx] = clamp_u8((gx * gx + gy * gy).sqrt());
            field.direction[idx] = gy.atan2(gx);
        }
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_plane() -> GrayPlane {
        // 5x5, columns 0..=1 dark, 2..=4 bright
        let mut plane = GrayPlane::new(5, 5);
        for y in 0..5 {
            for x in 2..5 {
                plane.data[y * 5 + x] = 100;
            }
        }
        plane
    }

    #[test]
    fn test_flat_plane_has_zero_gradient() {
        let plane = GrayPlane {
            width: 4,
            height: 4,
            data: vec![90; 16],
        };
        let field = compute_gradient(&plane, &Kernel::SOBEL_X, &Kernel::SOBEL_Y);
        assert!(field.magnitude.iter().all(|&m| m == 0));
    }

    #[test]
    fn test_vertical_step_points_along_x() {
        let field = compute_gradient(&step_plane(), &Kernel::SOBEL_X, &Kernel::SOBEL_Y);
        let idx = 2 * 5 + 1;
        // gx = 400 clamps to 255
        assert_eq!(field.magnitude[idx], 255);
        assert!(field.direction[idx].abs() < 1e-6);
        // border untouched
        assert_eq!(field.magnitude[2 * 5], 0);
        assert_eq!(field.magnitude[2 * 5 + 4], 0);
    }

    #[test]
    fn test_prewitt_is_weaker_than_sobel() {
        let plane = GrayPlane {
            width: 3,
            height: 3,
            data: vec![0, 10, 20, 0, 10, 20, 0, 10, 20],
        };
        let sobel = compute_gradient(&plane, &Kernel::SOBEL_X, &Kernel::SOBEL_Y);
        let prewitt = compute_gradient(&plane, &Kernel::PREWITT_X, &Kernel::PREWITT_Y);
        assert_eq!(sobel.magnitude[4], 80);
        assert_eq!(prewitt.magnitude[4], 60);
    }

    #[test]
    fn test_blur_keeps_border_and_smooths_interior() {
        let mut plane = GrayPlane::new(3, 3);
        plane.data[4] = 160;
        plane.data[0] = 7;
        let out = gaussian_blur(&plane);
        assert_eq!(out.data[4], 40);
        assert_eq!(out.data[0], 7);
    }
}
