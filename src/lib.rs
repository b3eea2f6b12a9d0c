//! rasterlab: a small raster graphics sandbox.
//!
//! Two halves share one [`Engine`]:
//!
//! - a square cell grid with integer rasterizers (line, circle, ellipse,
//!   quadratic curve, polyline), 4-connected fill, translation and rotation
//! - an RGBA image path with gray conversion, binarization, 3x3 denoising and
//!   Sobel / Prewitt / Canny edge detection
//!
//! [`Session`] layers the interactive state (active tool, collected points,
//! pivot, loaded image) on top, and [`Script`] drives a session from JSON.

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod image;
pub mod pattern;
pub mod script;
pub mod session;
pub mod util;

pub use config::SandboxConfig;
pub use engine::{Capabilities, Engine};
pub use error::{Result, SandboxError};
pub use geometry::{Point, ShapeKind};
pub use grid::{Cell, Grid, Paint};
pub use image::{CannyParams, ConversionMethod, EdgeMethod, Hysteresis, Operation, PixelBuffer, ProcessParams};
pub use pattern::PatternKind;
pub use script::{Command, Script};
pub use session::{Session, Tool};
