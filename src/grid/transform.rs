//! Affine moves of painted cells: translation and rotation about a pivot.
//!
//! Both transforms scan the source grid in row-major order and write into a
//! fresh grid. Cells whose destination leaves the grid are lost, and when two
//! cells land on the same destination the later one in scan order wins.

use super::Grid;
use crate::error::{Result, SandboxError};
use crate::geometry::{round_half_up, Point};

impl Grid {
    /// Move every painted cell from (i, j) to (i - dx, j + dy).
    pub fn translated(&self, dx: i32, dy: i32) -> Grid {
        let mut out = Grid::new(self.size);
        let mut dropped = 0usize;
        for (i, j, paint) in self.painted() {
            let moved = match (i.checked_sub(dx), j.checked_add(dy)) {
                (Some(row), Some(col)) => out.set(row, col, Some(paint)),
                _ => false,
            };
            if !moved {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::debug!("translate ({}, {}): {} cells left the grid", dx, dy, dropped);
        }
        out
    }

    /// Rotate painted cells clockwise by `angle_degrees` about `pivot`.
    ///
    /// Each destination coordinate is rounded independently, so the shape is
    /// not preserved exactly: repeated small rotations drift and can merge
    /// cells.
    pub fn rotated(&self, pivot: Option<Point>, angle_degrees: f64) -> Result<Grid> {
        let pivot = pivot.ok_or(SandboxError::MissingPivot)?;
        let theta = (-angle_degrees).to_radians();
        let (sin, cos) = theta.sin_cos();

        let mut out = Grid::new(self.size);
        let mut dropped = 0usize;
        for (i, j, paint) in self.painted() {
            let x = (i64::from(i) - i64::from(pivot.x)) as f64;
            let y = (i64::from(j) - i64::from(pivot.y)) as f64;
            let rx = round_half_up(x * cos - y * sin) + i64::from(pivot.x);
            let ry = round_half_up(x * sin + y * cos) + i64::from(pivot.y);
            let moved = match (i32::try_from(rx), i32::try_from(ry)) {
                (Ok(row), Ok(col)) => out.set(row, col, Some(paint)),
                _ => false,
            };
            if !moved {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::debug!(
                "rotate {} deg about ({}, {}): {} cells left the grid",
                angle_degrees,
                pivot.x,
                pivot.y,
                dropped
            );
        }
        Ok(out)
    }
}
