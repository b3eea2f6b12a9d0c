//! 4-connected region fill driven by an explicit work stack.

use super::{Cell, Grid, Paint};
use crate::geometry::Point;

impl Grid {
    /// Recolor the 4-connected region of `target` cells that contains `seed`.
    ///
    /// Returns an unchanged copy when the seed is outside the grid, when the
    /// seed cell is not `target`, or when `target` already is `fill`.
    pub fn filled(&self, seed: Point, target: Cell, fill: Paint) -> Grid {
        let mut out = self.clone();
        if target == Some(fill) || self.at(seed) != Some(target) {
            return out;
        }

        let mut stack = vec![seed];
        let mut recolored = 0usize;
        while let Some(p) = stack.pop() {
            if out.at(p) != Some(target) {
                continue;
            }
            out.set(p.x, p.y, Some(fill));
            recolored += 1;
            stack.extend_from_slice(&[
                Point::new(p.x + 1, p.y),
                Point::new(p.x - 1, p.y),
                Point::new(p.x, p.y + 1),
                Point::new(p.x, p.y - 1),
            ]);
        }
        log::debug!("fill from ({}, {}): recolored {} cells", seed.x, seed.y, recolored);
        out
    }
}
