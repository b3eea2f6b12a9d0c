//! Interactive drawing session: the grid, the active tool and whatever the
//! tool has collected so far.
//!
//! A session is the only stateful piece of the crate. It owns the current
//! grid snapshot and the loaded image, and replaces them with the engine's
//! results as commands arrive.

use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::error::Result;
use crate::geometry::{Point, ShapeKind};
use crate::grid::{Grid, Paint};
use crate::image::{ConversionMethod, EdgeMethod, Operation, PixelBuffer};

/// What a cell click does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tool {
    /// Two clicks define a shape
    Shape(ShapeKind),
    /// Every click extends an open chain of segments
    Polyline,
    /// Recolor the region under the click
    Fill,
    /// Clicks are ignored; use [`Session::translate`]
    Translate,
    /// First click picks the pivot for [`Session::rotate`]
    Rotate,
}

impl Default for Tool {
    fn default() -> Self {
        Self::Shape(ShapeKind::Line)
    }
}

impl Tool {
    /// Resolve a textual selector. Unknown names fall back to the line tool.
    pub fn from_selector(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "polyline" => Self::Polyline,
            "fill" => Self::Fill,
            "translate" => Self::Translate,
            "rotate" => Self::Rotate,
            other => Self::Shape(ShapeKind::from_selector(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shape(kind) => kind.as_str(),
            Self::Polyline => "polyline",
            Self::Fill => "fill",
            Self::Translate => "translate",
            Self::Rotate => "rotate",
        }
    }
}

impl From<String> for Tool {
    fn from(name: String) -> Self {
        Self::from_selector(&name)
    }
}

impl From<Tool> for String {
    fn from(tool: Tool) -> Self {
        tool.as_str().to_owned()
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    engine: Engine,
    grid: Grid,
    tool: Tool,
    /// Points collected by the shape and polyline tools
    selected: Vec<Point>,
    pivot: Option<Point>,
    image: Option<PixelBuffer>,
    processed: Option<PixelBuffer>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}

impl Session {
    pub fn new(engine: Engine) -> Self {
        let grid = engine.new_grid();
        Self {
            engine,
            grid,
            tool: Tool::default(),
            selected: Vec::new(),
            pivot: None,
            image: None,
            processed: None,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn selected(&self) -> &[Point] {
        &self.selected
    }

    pub fn pivot(&self) -> Option<Point> {
        self.pivot
    }

    pub fn image(&self) -> Option<&PixelBuffer> {
        self.image.as_ref()
    }

    /// Result of the last image command
    pub fn processed(&self) -> Option<&PixelBuffer> {
        self.processed.as_ref()
    }

    // ========================================================================
    // Grid page
    // ========================================================================

    /// Switch tools. Collected points are discarded, and leaving the rotate
    /// tool forgets the pivot.
    pub fn select_tool(&mut self, tool: Tool) {
        if self.tool == Tool::Rotate && tool != Tool::Rotate {
            self.pivot = None;
        }
        self.selected.clear();
        self.tool = tool;
        log::debug!("tool: {}", tool.as_str());
    }

    /// Handle a click on cell (row, col) with the active tool.
    pub fn click(&mut self, row: i32, col: i32) {
        if !self.grid.in_bounds(row, col) {
            log::debug!("click ({}, {}) outside the grid ignored", row, col);
            return;
        }
        let point = Point::new(row, col);

        match self.tool {
            Tool::Shape(kind) => {
                if let Some(&first) = self.selected.first() {
                    let points = self.engine.rasterize(kind, first, point);
                    self.grid = self.engine.paint(&self.grid, &points, Paint::Primary);
                    self.selected.clear();
                } else {
                    self.selected.push(point);
                }
            },
            Tool::Polyline => {
                self.selected.push(point);
                if self.selected.len() > 1 {
                    let points = self.engine.polyline(&self.selected);
                    self.grid = self.engine.paint(&self.grid, &points, Paint::Primary);
                }
            },
            Tool::Fill => {
                // Stroke cells are walls, never fill targets
                let target = self.grid.at(point).flatten();
                if target == Some(Paint::Primary) {
                    return;
                }
                self.grid = self.engine.fill(&self.grid, point, target, Paint::Fill);
            },
            Tool::Translate => {},
            Tool::Rotate => {
                if self.pivot.is_none() {
                    self.pivot = Some(point);
                    log::debug!("pivot: ({}, {})", row, col);
                }
            },
        }
    }

    pub fn translate(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.grid = self.engine.translate(&self.grid, dx, dy)?;
        Ok(())
    }

    /// Rotate about the selected pivot. Fails with `MissingPivot` when none
    /// has been picked.
    pub fn rotate(&mut self, angle_degrees: f64) -> Result<()> {
        self.grid = self.engine.rotate(&self.grid, self.pivot, angle_degrees)?;
        Ok(())
    }

    /// Drop the pivot so the next rotate-tool click picks a new one
    pub fn new_pivot(&mut self) {
        self.pivot = None;
    }

    /// Empty the grid and forget collected points
    pub fn clear(&mut self) {
        self.grid = self.engine.clear(&self.grid);
        self.selected.clear();
    }

    /// Draw a shape directly, bypassing the click protocol
    pub fn draw(&mut self, kind: ShapeKind, p0: Point, p1: Point) {
        let points = self.engine.rasterize(kind, p0, p1);
        self.grid = self.engine.paint(&self.grid, &points, Paint::Primary);
    }

    pub fn draw_polyline(&mut self, points: &[Point]) {
        let points = self.engine.polyline(points);
        self.grid = self.engine.paint(&self.grid, &points, Paint::Primary);
    }

    /// Fill the region under `seed`, whatever it holds
    pub fn fill(&mut self, seed: Point) {
        if let Some(target) = self.grid.at(seed) {
            self.grid = self.engine.fill(&self.grid, seed, target, Paint::Fill);
        }
    }

    // ========================================================================
    // Image page
    // ========================================================================

    /// Replace the loaded image and discard the previous result
    pub fn load_image(&mut self, buffer: PixelBuffer) {
        log::debug!("image loaded: {}x{}", buffer.width(), buffer.height());
        self.image = Some(buffer);
        self.processed = None;
    }

    /// Run a color operation on the loaded image. Without an image this is a
    /// logged no-op returning `None`.
    pub fn process(&mut self, operation: Operation, method: ConversionMethod) -> Option<&PixelBuffer> {
        let Some(image) = &self.image else {
            log::warn!("{:?} requested with no image loaded", operation);
            return None;
        };
        let params = self.engine.process_params(method);
        self.processed = Some(self.engine.process_image(image, operation, &params));
        self.processed.as_ref()
    }

    pub fn detect_edges(&mut self, method: EdgeMethod) -> Option<&PixelBuffer> {
        let Some(image) = &self.image else {
            log::warn!("{} edge detection requested with no image loaded", method.as_str());
            return None;
        };
        self.processed = Some(self.engine.detect_edges(image, method));
        self.processed.as_ref()
    }
}
