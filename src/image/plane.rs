//! Single-channel 8-bit plane used between edge-detection stages.

use super::PixelBuffer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayPlane {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayPlane {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Mean of R, G and B per pixel, rounded.
    pub fn from_rgb_mean(buffer: &PixelBuffer) -> Self {
        let data = buffer
            .as_bytes()
            .chunks_exact(4)
            .map(|px| {
                let sum = u16::from(px[0]) + u16::from(px[1]) + u16::from(px[2]);
                ((sum + 1) / 3) as u8
            })
            .collect();
        Self {
            width: buffer.width() as usize,
            height: buffer.height() as usize,
            data,
        }
    }

    /// True when the plane has at least one interior pixel
    #[inline]
    pub fn has_interior(&self) -> bool {
        self.width >= 3 && self.height >= 3
    }

    /// Replicate into R, G and B with opaque alpha
    pub fn to_rgba(&self) -> PixelBuffer {
        let mut out = PixelBuffer::with_size(self.width as u32, self.height as u32);
        for (px, &v) in out.as_bytes_mut().chunks_exact_mut(4).zip(&self.data) {
            px.copy_from_slice(&[v, v, v, 255]);
        }
        out
    }
}
