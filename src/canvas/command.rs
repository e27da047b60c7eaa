//! Drawing primitives emitted by the renderer.

use serde::{Deserialize, Serialize};

pub type Color = &'static str;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear { width: f64, height: f64, color: Color },
    FillCircle { center: Point, radius: f64, color: Color },
    StrokeLine {
        from: Point,
        to: Point,
        color: Color,
        width: f64,
        dash: Option<[f64; 2]>,
    },
    FillPolygon { points: Vec<Point>, color: Color },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        radius: f64,
        fill: Option<Color>,
        stroke: Option<Color>,
        stroke_width: f64,
    },
    /// Left-aligned text; `at` is the baseline start.
    Text {
        at: Point,
        text: String,
        color: Color,
        size: f64,
        bold: bool,
    },
}
