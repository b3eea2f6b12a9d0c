//! Double-threshold classification of a suppressed magnitude plane.
//!
//! Thresholds are fractions of the plane's maximum. Pixels at or above the
//! high threshold are strong edges, pixels below the low threshold are
//! discarded. What happens to the weak pixels in between depends on
//! [`Hysteresis`]:
//!
//! - `SinglePass` promotes a weak pixel only if one of its 8 neighbors is
//!   already 255 when the raster scan reaches it. Neighbors later in the scan
//!   still hold their raw magnitudes, so a weak chain that only connects to a
//!   strong edge below or to the right of it is dropped. This is the default.
//! - `Connected` grows every strong edge through all 8-connected weak pixels,
//!   independent of scan order. It yields a superset of `SinglePass`.

use serde::{Deserialize, Serialize};

use crate::image::GrayPlane;

pub const EDGE: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hysteresis {
    #[default]
    SinglePass,
    Connected,
}

const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Classify `suppressed` into {0, 255}. The border is always 0, and a plane
/// whose maximum is 0 has no edges at all.
pub fn hysteresis(suppressed: &GrayPlane, low_ratio: f32, high_ratio: f32, mode: Hysteresis) -> GrayPlane {
    let (w, h) = (suppressed.width, suppressed.height);
    let max = suppressed.data.iter().copied().max().unwrap_or(0);
    if max == 0 || w < 3 || h < 3 {
        return GrayPlane::new(w, h);
    }
    let low = f32::from(max) * low_ratio;
    let high = f32::from(max) * high_ratio;
    log::trace!("hysteresis: max {} low {:.2} high {:.2}", max, low, high);

    match mode {
        Hysteresis::SinglePass => single_pass(suppressed, low, high),
        Hysteresis::Connected => connected(suppressed, low, high),
    }
}

#[inline]
fn neighbor(idx: usize, w: usize, (dx, dy): (isize, isize)) -> usize {
    (idx as isize + dy * w as isize + dx) as usize
}

fn single_pass(suppressed: &GrayPlane, low: f32, high: f32) -> GrayPlane {
    let (w, h) = (suppressed.width, suppressed.height);
    // Scratch plane starts as a copy so unscanned neighbors read raw values
    let mut out = suppressed.clone();

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let idx = y * w + x;
            let v = f32::from(suppressed.data[idx]);
            out.data[idx] = if v >= high {
                EDGE
            } else if v < low {
                0
            } else if NEIGHBORS.iter().any(|&d| out.data[neighbor(idx, w, d)] == EDGE) {
                EDGE
            } else {
                0
            };
        }
    }
    clear_border(&mut out);
    out
}

fn connected(suppressed: &GrayPlane, low: f32, high: f32) -> GrayPlane {
    let (w, h) = (suppressed.width, suppressed.height);
    let mut out = GrayPlane::new(w, h);
    let interior = |idx: usize| {
        let (x, y) = (idx % w, idx / w);
        x >= 1 && y >= 1 && x < w - 1 && y < h - 1
    };

    let mut stack = Vec::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let idx = y * w + x;
            if f32::from(suppressed.data[idx]) < high || out.data[idx] == EDGE {
                continue;
            }
            out.data[idx] = EDGE;
            stack.push(idx);
            while let Some(p) = stack.pop() {
                for &d in &NEIGHBORS {
                    let n = neighbor(p, w, d);
                    if interior(n) && out.data[n] != EDGE && f32::from(suppressed.data[n]) >= low {
                        out.data[n] = EDGE;
                        stack.push(n);
                    }
                }
            }
        }
    }
    out
}

fn clear_border(plane: &mut GrayPlane) {
    let (w, h) = (plane.width, plane.height);
    for x in 0..w {
        plane.data[x] = 0;
        plane.data[(h - 1) * w + x] = 0;
    }
    for y in 0..h {
        plane.data[y * w] = 0;
        plane.data[y * w + w - 1] = 0;
    }
}
