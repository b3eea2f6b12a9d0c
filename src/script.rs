//! JSON command scripts that drive a [`Session`].
//!
//! A script is a plain JSON array of commands tagged by `op`:
//!
//! ```json
//! [
//!   { "op": "tool", "tool": "circle" },
//!   { "op": "click", "row": 10, "col": 10 },
//!   { "op": "click", "row": 10, "col": 14 },
//!   { "op": "load_pattern", "pattern": "disc", "width": 32, "height": 32 },
//!   { "op": "edges", "method": "canny" }
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{Point, ShapeKind};
use crate::image::{ConversionMethod, EdgeMethod, Operation};
use crate::pattern::{self, PatternKind};
use crate::session::{Session, Tool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Tool {
        tool: Tool,
    },
    Click {
        row: i32,
        col: i32,
    },
    Translate {
        #[serde(default)]
        dx: i32,
        #[serde(default)]
        dy: i32,
    },
    Rotate {
        angle: f64,
    },
    NewPivot,
    Clear,
    /// Paint a shape without going through clicks
    Draw {
        shape: ShapeKind,
        from: Point,
        to: Point,
    },
    Polyline {
        points: Vec<Point>,
    },
    Fill {
        at: Point,
    },
    LoadPattern {
        #[serde(default)]
        pattern: PatternKind,
        width: u32,
        height: u32,
    },
    Process {
        operation: Operation,
        #[serde(default)]
        method: ConversionMethod,
    },
    Edges {
        #[serde(default)]
        method: EdgeMethod,
    },
}

impl Command {
    /// Apply this command to `session`
    pub fn apply(&self, session: &mut Session) -> Result<()> {
        match self {
            Self::Tool { tool } => session.select_tool(*tool),
            Self::Click { row, col } => session.click(*row, *col),
            Self::Translate { dx, dy } => session.translate(*dx, *dy)?,
            Self::Rotate { angle } => session.rotate(*angle)?,
            Self::NewPivot => session.new_pivot(),
            Self::Clear => session.clear(),
            Self::Draw { shape, from, to } => session.draw(*shape, *from, *to),
            Self::Polyline { points } => session.draw_polyline(points),
            Self::Fill { at } => session.fill(*at),
            Self::LoadPattern {
                pattern,
                width,
                height,
            } => session.load_image(pattern::generate(*pattern, *width, *height)?),
            Self::Process { operation, method } => {
                session.process(*operation, *method);
            },
            Self::Edges { method } => {
                session.detect_edges(*method);
            },
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub commands: Vec<Command>,
}

impl Script {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// Load script from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Run every command in order, stopping at the first failure.
    pub fn run(&self, session: &mut Session) -> Result<()> {
        for (i, command) in self.commands.iter().enumerate() {
            log::trace!("command {}: {:?}", i, command);
            if let Err(e) = command.apply(session) {
                log::warn!("command {} failed: {}", i, e);
                return Err(e);
            }
        }
        Ok(())
    }
}
