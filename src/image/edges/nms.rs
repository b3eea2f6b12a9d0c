//! Non-maximum suppression along the quantized gradient direction.
//!
//! Each interior pixel's direction is bucketed into one of four π/4-wide
//! orientation bands, and the pixel is zeroed when either neighbor along that
//! orientation has a larger magnitude. Ties survive. The border keeps the
//! gradient field's values (zero).

use std::f32::consts::PI;

use super::grad::GradientField;
use crate::image::GrayPlane;

/// Orientation band of a gradient direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Diagonal45,
    Vertical,
    Diagonal135,
}

impl Orientation {
    /// Bucket an angle in [-π, π] into its band.
    pub fn from_angle(angle: f32) -> Self {
        const P8: f32 = PI / 8.0;
        if (-P8..P8).contains(&angle) || angle < -7.0 * P8 || angle >= 7.0 * P8 {
            Self::Horizontal
        } else if (P8..3.0 * P8).contains(&angle) || (-7.0 * P8..-5.0 * P8).contains(&angle) {
            Self::Diagonal45
        } else if (3.0 * P8..5.0 * P8).contains(&angle) || (-5.0 * P8..-3.0 * P8).contains(&angle) {
            Self::Vertical
        } else {
            Self::Diagonal135
        }
    }

    /// Offsets (dx, dy) of the two neighbors compared against.
    fn neighbor_offsets(self) -> [(isize, isize); 2] {
        match self {
            Self::Horizontal => [(1, 0), (-1, 0)],
            Self::Diagonal45 => [(1, 1), (-1, -1)],
            Self::Vertical => [(0, 1), (0, -1)],
            Self::Diagonal135 => [(-1, 1), (1, -1)],
        }
    }
}

pub fn non_maximum_suppression(field: &GradientField) -> GrayPlane {
    let (w, h) = (field.width, field.height);
    let mut out = field.magnitude_plane();
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let idx = y * w + x;
            let mag = field.magnitude[idx];
            let suppressed = Orientation::from_angle(field.direction[idx])
                .neighbor_offsets()
                .iter()
                .any(|&(dx, dy)| {
                    let n = (y as isize + dy) as usize * w + (x as isize + dx) as usize;
                    mag < field.magnitude[n]
                });
            if suppressed {
                out.data[idx] = 0;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_bands() {
        assert_eq!(Orientation::from_angle(0.0), Orientation::Horizontal);
        assert_eq!(Orientation::from_angle(PI), Orientation::Horizontal);
        assert_eq!(Orientation::from_angle(-PI), Orientation::Horizontal);
        assert_eq!(Orientation::from_angle(PI / 4.0), Orientation::Diagonal45);
        assert_eq!(Orientation::from_angle(-3.0 * PI / 4.0), Orientation::Diagonal45);
        assert_eq!(Orientation::from_angle(PI / 2.0), Orientation::Vertical);
        assert_eq!(Orientation::from_angle(-PI / 2.0), Orientation::Vertical);
        assert_eq!(Orientation::from_angle(3.0 * PI / 4.0), Orientation::Diagonal135);
        assert_eq!(Orientation::from_angle(-PI / 4.0), Orientation::Diagonal135);
    }

    fn field(width: usize, height: usize, magnitude: Vec<u8>, angle: f32) -> GradientField {
        GradientField {
            width,
            height,
            direction: vec![angle; magnitude.len()],
            magnitude,
        }
    }

    #[test]
    fn test_thins_a_wide_ridge() {
        // Horizontal gradient, magnitudes ramp to a peak in column 2
        let row = [0u8, 50, 90, 60, 0];
        let mags: Vec<u8> = row.iter().copied().cycle().take(15).collect();
        let out = non_maximum_suppression(&field(5, 3, mags, 0.0));
        assert_eq!(&out.data[5..10], &[0, 0, 90, 0, 0]);
    }

    #[test]
    fn test_equal_neighbors_survive() {
        let mags = vec![40u8; 9];
        let out = non_maximum_suppression(&field(3, 3, mags, PI / 2.0));
        assert_eq!(out.data[4], 40);
    }

    #[test]
    fn test_only_neighbors_along_direction_matter() {
        // Strong vertical neighbors, weak horizontal ones: a horizontal
        // direction keeps the center, a vertical one suppresses it.
        let mags = vec![0, 99, 0, 10, 50, 10, 0, 99, 0];
        let kept = non_maximum_suppression(&field(3, 3, mags.clone(), 0.0));
        assert_eq!(kept.data[4], 50);
        let dropped = non_maximum_suppression(&field(3, 3, mags, PI / 2.0));
        assert_eq!(dropped.data[4], 0);
    }
}
