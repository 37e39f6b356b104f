//! In-memory backend that records draw commands.

use super::traits::{BorderStyle, CardCanvas, DrawCommand, TextStyle};
use crate::error::{CardError, Result};
use crate::layout::{Color, Rect, RoundedRect};
use image::RgbImage;

/// Canvas that keeps every draw call, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    reject_images: bool,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// A canvas whose `draw_image` always fails.
    pub fn rejecting_images() -> Self {
        Self {
            reject_images: true,
            ..Self::default()
        }
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text of every text command, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every image command, in draw order.
    pub fn images(&self) -> Vec<(&RgbImage, Rect)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Image { image, placement } => Some((image, *placement)),
                _ => None,
            })
            .collect()
    }
}

impl CardCanvas for RecordingCanvas {
    fn fill_rounded_rect(&mut self, shape: &RoundedRect, color: Color) -> Result<()> {
        self.commands.push(DrawCommand::FillRoundedRect {
            shape: *shape,
            color,
        });
        Ok(())
    }

    fn stroke_rounded_rect(&mut self, shape: &RoundedRect, border: &BorderStyle) -> Result<()> {
        self.commands.push(DrawCommand::StrokeRoundedRect {
            shape: *shape,
            border: *border,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) -> Result<()> {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            style: *style,
        });
        Ok(())
    }

    fn draw_image(&mut self, image: &RgbImage, placement: Rect) -> Result<()> {
        if self.reject_images {
            return Err(CardError::ImageEmbed("images rejected by canvas".to_string()));
        }
        self.commands.push(DrawCommand::Image {
            image: image.clone(),
            placement,
        });
        Ok(())
    }
}
