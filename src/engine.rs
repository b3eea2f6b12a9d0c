//! Single entry point shared by the drawing grid and the image page.
//!
//! The engine holds only immutable configuration. Every call borrows its
//! inputs and returns a new grid or buffer.

use crate::config::SandboxConfig;
use crate::error::{Result, SandboxError};
use crate::geometry::{self, Point, ShapeKind};
use crate::grid::{Cell, Grid, Paint};
use crate::image::{self, EdgeMethod, Operation, PixelBuffer, ProcessParams};

/// Which grid operations an engine exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capabilities {
    /// Rasterize, paint and fill only
    GeometryOnly,
    /// Geometry plus translate and rotate
    #[default]
    GeometryAndTransform,
}

impl Capabilities {
    pub fn allows_transform(&self) -> bool {
        matches!(self, Self::GeometryAndTransform)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: SandboxConfig,
    capabilities: Capabilities,
}

impl Engine {
    pub fn new(config: SandboxConfig, capabilities: Capabilities) -> Self {
        Self {
            config,
            capabilities,
        }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Empty grid sized from the configuration
    pub fn new_grid(&self) -> Grid {
        Grid::new(self.config.grid_size)
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    pub fn rasterize(&self, kind: ShapeKind, p0: Point, p1: Point) -> Vec<Point> {
        geometry::rasterize(kind, p0, p1, self.config.curve_offset)
    }

    pub fn polyline(&self, points: &[Point]) -> Vec<Point> {
        geometry::polyline(points)
    }

    // ========================================================================
    // Grid
    // ========================================================================

    pub fn paint(&self, grid: &Grid, points: &[Point], paint: Paint) -> Grid {
        grid.paint(points, paint)
    }

    pub fn clear(&self, grid: &Grid) -> Grid {
        grid.cleared()
    }

    pub fn fill(&self, grid: &Grid, seed: Point, target: Cell, fill: Paint) -> Grid {
        grid.filled(seed, target, fill)
    }

    pub fn translate(&self, grid: &Grid, dx: i32, dy: i32) -> Result<Grid> {
        self.require_transform("translate")?;
        Ok(grid.translated(dx, dy))
    }

    pub fn rotate(&self, grid: &Grid, pivot: Option<Point>, angle_degrees: f64) -> Result<Grid> {
        self.require_transform("rotate")?;
        grid.rotated(pivot, angle_degrees)
    }

    fn require_transform(&self, operation: &'static str) -> Result<()> {
        if self.capabilities.allows_transform() {
            Ok(())
        } else {
            Err(SandboxError::CapabilityDisabled(operation))
        }
    }

    // ========================================================================
    // Image
    // ========================================================================

    /// Parameters for `process_image` with the configured binarize threshold
    pub fn process_params(&self, method: image::ConversionMethod) -> ProcessParams {
        ProcessParams {
            method,
            threshold: self.config.binarize_threshold,
        }
    }

    pub fn process_image(&self, buffer: &PixelBuffer, operation: Operation, params: &ProcessParams) -> PixelBuffer {
        image::process_image(buffer, operation, params)
    }

    pub fn detect_edges(&self, buffer: &PixelBuffer, method: EdgeMethod) -> PixelBuffer {
        image::detect_edges(buffer, method, &self.config.canny)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ConversionMethod;

    #[test]
    fn test_geometry_only_rejects_transforms() {
        let engine = Engine::new(SandboxConfig::default(), Capabilities::GeometryOnly);
        let grid = engine.new_grid();
        assert!(matches!(
            engine.translate(&grid, 1, 0),
            Err(SandboxError::CapabilityDisabled("translate"))
        ));
        assert!(matches!(
            engine.rotate(&grid, Some(Point::new(0, 0)), 45.0),
            Err(SandboxError::CapabilityDisabled("rotate"))
        ));
    }

    #[test]
    fn test_rotate_without_pivot_surfaces_error() {
        let engine = Engine::default();
        let grid = engine.new_grid();
        assert!(matches!(engine.rotate(&grid, None, 30.0), Err(SandboxError::MissingPivot)));
    }

    #[test]
    fn test_curve_offset_comes_from_config() {
        let config = SandboxConfig {
            curve_offset: 0,
            ..SandboxConfig::default()
        };
        let engine = Engine::new(config, Capabilities::GeometryOnly);
        let points = engine.rasterize(ShapeKind::Curve, Point::new(0, 4), Point::new(8, 4));
        // With no lift the curve degenerates to the straight segment
        assert!(points.iter().all(|p| p.y == 4));
    }

    #[test]
    fn test_unvalidated_huge_grid_size_is_clamped() {
        let config = SandboxConfig {
            grid_size: usize::MAX,
            ..SandboxConfig::default()
        };
        let engine = Engine::new(config, Capabilities::default());
        assert_eq!(engine.new_grid().size(), crate::grid::MAX_GRID_SIZE);
    }

    #[test]
    fn test_process_params_use_configured_threshold() {
        let config = SandboxConfig {
            binarize_threshold: 10,
            ..SandboxConfig::default()
        };
        let engine = Engine::new(config, Capabilities::GeometryOnly);
        let params = engine.process_params(ConversionMethod::Median);
        assert_eq!(params.threshold, 10);
        let buffer = PixelBuffer::solid(2, 2, 20, 20, 20, 255).unwrap();
        let out = engine.process_image(&buffer, Operation::Binarize, &params);
        assert!(out.as_bytes().chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
    }
}
