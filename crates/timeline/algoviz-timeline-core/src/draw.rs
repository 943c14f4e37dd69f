//! Primitive draw operations handed to renderers.
//!
//! The op set is closed: renderers (image, vector, terminal) map each variant
//! onto their medium.

use serde::{Deserialize, Serialize};

/// Hex color such as `#RRGGBB`.
pub type Color = String;

/// (x, y)
pub type Point = [f32; 2];

pub const DEFAULT_TEXT_SIZE: u32 = 12;
pub const DEFAULT_TEXT_FILL: &str = "#222222";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawOp {
    /// Filled rectangle with an optional outline.
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Color,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<Color>,
    },
    Line {
        p1: Point,
        p2: Point,
        stroke: Color,
        width: f32,
    },
    Text {
        x: f32,
        y: f32,
        content: String,
        size: u32,
        weight: FontWeight,
        fill: Color,
    },
}

impl DrawOp {
    /// Text label with default size, weight and fill.
    pub fn text(x: f32, y: f32, content: impl Into<String>) -> Self {
        DrawOp::Text {
            x,
            y,
            content: content.into(),
            size: DEFAULT_TEXT_SIZE,
            weight: FontWeight::Normal,
            fill: DEFAULT_TEXT_FILL.to_string(),
        }
    }

    /// One-pixel line segment.
    pub fn line(p1: Point, p2: Point, stroke: impl Into<Color>) -> Self {
        DrawOp::Line {
            p1,
            p2,
            stroke: stroke.into(),
            width: 1.0,
        }
    }

    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            DrawOp::Rect { .. } => "rect",
            DrawOp::Line { .. } => "line",
            DrawOp::Text { .. } => "text",
        }
    }
}
