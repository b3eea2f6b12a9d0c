//! 3×3 convolution kernels and weighted neighborhood sums.
//!
//! Two access patterns are provided:
//! - [`apply_kernel`] works on interleaved RGBA bytes and silently skips
//!   neighbors that fall outside the buffer (no padding, no wrap).
//! - [`convolve_at`] works on a single-channel plane and assumes the caller
//!   only visits interior pixels, so it does no bounds checks.

/// Immutable 3×3 weight matrix, indexed `[row][col]` = `[dy + 1][dx + 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel([[f32; 3]; 3]);

impl Kernel {
    pub const GAUSSIAN: Kernel = Kernel([
        [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
        [2.0 / 16.0, 4.0 / 16.0, 2.0 / 16.0],
        [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
    ]);
    pub const MEAN: Kernel = Kernel([[1.0 / 9.0; 3]; 3]);
    pub const SOBEL_X: Kernel = Kernel([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]]);
    pub const SOBEL_Y: Kernel = Kernel([[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]]);
    pub const PREWITT_X: Kernel = Kernel([[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]]);
    pub const PREWITT_Y: Kernel = Kernel([[-1.0, -1.0, -1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);

    /// Weight for the neighbor at offset (dx, dy), both in -1..=1
    #[inline]
    pub fn weight(&self, dx: i32, dy: i32) -> f32 {
        self.0[(dy + 1) as usize][(dx + 1) as usize]
    }

    pub fn sum(&self) -> f32 {
        self.0.iter().flatten().sum()
    }
}

/// Weighted RGB sum over the 3×3 neighborhood of the pixel whose first byte
/// is at `center_index` in an RGBA buffer `width` pixels wide.
pub fn apply_kernel(data: &[u8], center_index: usize, width: usize, kernel: &Kernel) -> [f32; 3] {
    if width == 0 {
        return [0.0; 3];
    }
    let height = (data.len() / 4 / width) as i32;
    let pixel = center_index / 4;
    let cx = (pixel % width) as i32;
    let cy = (pixel / width) as i32;

    let mut acc = [0.0f32; 3];
    for dy in -1..=1 {
        for dx in -1..=1 {
            let x = cx + dx;
            let y = cy + dy;
            if x < 0 || x >= width as i32 || y < 0 || y >= height {
                continue;
            }
            let idx = (y as usize * width + x as usize) * 4;
            let w = kernel.weight(dx, dy);
            acc[0] += f32::from(data[idx]) * w;
            acc[1] += f32::from(data[idx + 1]) * w;
            acc[2] += f32::from(data[idx + 2]) * w;
        }
    }
    acc
}

/// Weighted sum over the 3×3 neighborhood of interior pixel (x, y) in a
/// single-channel plane. Requires `1 <= x < width - 1` and `1 <= y < height - 1`.
#[inline]
pub fn convolve_at(plane: &[u8], width: usize, x: usize, y: usize, kernel: &Kernel) -> f32 {
    let mut acc = 0.0f32;
    for (ky, row) in kernel.0.iter().enumerate() {
        let base = (y + ky - 1) * width + x - 1;
        acc += f32::from(plane[base]) * row[0]
            + f32::from(plane[base + 1]) * row[1]
            + f32::from(plane[base + 2]) * row[2];
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothing_kernels_sum_to_one() {
        assert!((Kernel::GAUSSIAN.sum() - 1.0).abs() < 1e-6);
        assert!((Kernel::MEAN.sum() - 1.0).abs() < 1e-6);
        assert_eq!(Kernel::SOBEL_X.sum(), 0.0);
        assert_eq!(Kernel::PREWITT_Y.sum(), 0.0);
    }

    #[test]
    fn test_apply_kernel_interior_of_flat_buffer() {
        let data: Vec<u8> = [40u8, 80, 120, 255].repeat(9);
        let [r, g, b] = apply_kernel(&data, 4 * 4, 3, &Kernel::GAUSSIAN);
        assert!((r - 40.0).abs() < 1e-4);
        assert!((g - 80.0).abs() < 1e-4);
        assert!((b - 120.0).abs() < 1e-4);
    }

    #[test]
    fn test_apply_kernel_skips_missing_neighbors() {
        // Corner of a flat 3x3 buffer only sees 4 of 9 weights: (4 + 2 + 2 + 1) / 16
        let data: Vec<u8> = [160u8, 160, 160, 255].repeat(9);
        let [r, _, _] = apply_kernel(&data, 0, 3, &Kernel::GAUSSIAN);
        assert!((r - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_apply_kernel_single_pixel() {
        let data = vec![10u8, 20, 30, 255];
        let [r, g, b] = apply_kernel(&data, 0, 1, &Kernel::GAUSSIAN);
        assert!((r - 2.5).abs() < 1e-4);
        assert!((g - 5.0).abs() < 1e-4);
        assert!((b - 7.5).abs() < 1e-4);
    }

    #[test]
    fn test_convolve_at_vertical_step() {
        // Left column 0, right columns 100
        let plane = [0u8, 100, 100, 0, 100, 100, 0, 100, 100];
        assert_eq!(convolve_at(&plane, 3, 1, 1, &Kernel::SOBEL_X), 400.0);
        assert_eq!(convolve_at(&plane, 3, 1, 1, &Kernel::SOBEL_Y), 0.0);
        assert_eq!(convolve_at(&plane, 3, 1, 1, &Kernel::PREWITT_X), 300.0);
    }
}
