use crate::error::{Result, SandboxError};

// ============================================================================
// Utility Functions
// ============================================================================

/// Write an RGBA pixel to a 4-byte slice
#[inline]
fn write_pixel_rgba(dest: &mut [u8], r: u8, g: u8, b: u8, a: u8) {
    dest[0] = r;
    dest[1] = g;
    dest[2] = b;
    dest[3] = a;
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 16384;

/// Interleaved RGBA8 pixel buffer, `width * height * 4` bytes.
///
/// Filters never resize a buffer: they read one and return a new one with
/// identical dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Byte length of a `width` x `height` buffer, rejecting sides above
    /// [`MAX_DIMENSION`].
    fn checked_len(width: u32, height: u32) -> Result<usize> {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(SandboxError::ImageTooLarge { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(SandboxError::ImageTooLarge { width, height })
    }

    /// Transparent black buffer. Only for dimensions taken from a buffer
    /// that already exists.
    pub(crate) fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Create a buffer where every pixel has the same color
    pub fn solid(width: u32, height: u32, r: u8, g: u8, b: u8, a: u8) -> Result<Self> {
        let mut pixels = vec![0; Self::checked_len(width, height)?];
        for px in pixels.chunks_exact_mut(4) {
            write_pixel_rgba(px, r, g, b, a);
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Wrap decoded RGBA bytes. The length must be exactly `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = Self::checked_len(width, height)?;
        if pixels.len() != expected {
            return Err(SandboxError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    pub fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Set a single pixel with custom alpha (bounds checked)
    #[inline]
    pub fn set_pixel_rgba(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8, a: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel_rgba(&mut self.pixels[idx..idx + 4], r, g, b, a);
        }
    }

    /// Set a single opaque pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        self.set_pixel_rgba(x, y, r, g, b, 255);
    }

    /// Read all 4 channels of a pixel (bounds checked)
    /// Returns (r, g, b, a) or None if out of bounds
    #[inline]
    pub fn get_pixel_rgba(&self, x: i32, y: i32) -> Option<(u8, u8, u8, u8)> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some((
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                self.pixels[idx + 3],
            ))
        } else {
            None
        }
    }

    /// Fill a rectangle, clipped to the buffer
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, r: u8, g: u8, b: u8) {
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(w)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(h)).min(i64::from(self.height));
        for row in y0..y1 {
            for col in x0..x1 {
                self.set_pixel(col as i32, row as i32, r, g, b);
            }
        }
    }

    /// Draw a filled circle using horizontal spans
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, r: u8, g: u8, b: u8) {
        if radius <= 0 {
            if radius == 0 {
                self.set_pixel(cx, cy, r, g, b);
            }
            return;
        }

        let (width, height) = (i64::from(self.width), i64::from(self.height));
        let mut span = |x0: i64, x1: i64, y: i64| {
            if y < 0 || y >= height {
                return;
            }
            for x in x0.max(0)..=x1.min(width - 1) {
                self.set_pixel(x as i32, y as i32, r, g, b);
            }
        };

        // Midpoint circle algorithm with span filling
        let (cx, cy) = (i64::from(cx), i64::from(cy));
        let mut x = i64::from(radius);
        let mut y = 0;
        let mut err = 1 - x;

        while x >= y {
            span(cx - x, cx + x, cy + y);
            span(cx - x, cx + x, cy - y);
            span(cx - y, cx + y, cy + x);
            span(cx - y, cx + y, cy - x);

            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Raw interleaved RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to raw pixels for filters writing their output buffer
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}
