//! The drawing seam between the card layout and its backends.

use crate::error::Result;
use crate::fonts::TypeFace;
use crate::layout::{Color, Rect, RoundedRect, BORDER_WIDTH_PT};
use image::RgbImage;

/// Face, size and fill of one text draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub face: TypeFace,
    pub size_pt: f32,
    pub color: Color,
}

/// Stroke style for outlines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderStyle {
    pub width_pt: f32,
    pub color: Color,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            width_pt: BORDER_WIDTH_PT,
            color: Color::BORDER,
        }
    }
}

/// A single recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Filled rounded rectangle
    FillRoundedRect { shape: RoundedRect, color: Color },

    /// Stroked, unfilled rounded rectangle
    StrokeRoundedRect {
        shape: RoundedRect,
        border: BorderStyle,
    },

    /// Text with its baseline origin at `(x, y)`
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },

    /// RGB raster scaled into `placement`
    Image { image: RgbImage, placement: Rect },
}

/// Operations the card layout needs from a backend.
///
/// Coordinates are millimetres from the bottom-left of the page.
pub trait CardCanvas {
    /// Fill a rounded rectangle.
    fn fill_rounded_rect(&mut self, shape: &RoundedRect, color: Color) -> Result<()>;

    /// Stroke the outline of a rounded rectangle without filling it.
    fn stroke_rounded_rect(&mut self, shape: &RoundedRect, border: &BorderStyle) -> Result<()>;

    /// Draw a line of text.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) -> Result<()>;

    /// Draw a raster scaled to exactly fill `placement`.
    fn draw_image(&mut self, image: &RgbImage, placement: Rect) -> Result<()>;
}
