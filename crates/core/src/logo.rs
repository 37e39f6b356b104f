//! Logo loading and shadow tinting.

use crate::error::{CardError, Result};
use image::{Rgb, RgbImage, RgbaImage};
use std::path::Path;
use tracing::debug;

/// How far the shadow copy is pulled towards white (0 = unchanged, 1 = white).
pub const SHADOW_LIGHTEN: f32 = 0.7;

/// A decoded logo with its pre-computed shadow copy.
#[derive(Debug, Clone)]
pub struct Logo {
    /// The logo flattened onto white.
    pub primary: RgbImage,
    /// A lighter copy drawn offset beneath the primary one.
    pub shadow: RgbImage,
}

impl Logo {
    /// Build both copies from an already decoded image.
    pub fn from_rgba(image: RgbaImage) -> Self {
        let primary = flatten_onto_white(image);
        let shadow = lighten(&primary, SHADOW_LIGHTEN);
        Self { primary, shadow }
    }

    pub fn width(&self) -> u32 {
        self.primary.width()
    }

    pub fn height(&self) -> u32 {
        self.primary.height()
    }
}

/// Decode the logo at `path`.
pub fn load_logo(path: &Path) -> Result<Logo> {
    let decoded = image::open(path).map_err(|e| CardError::LogoLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(CardError::LogoLoad {
            path: path.to_path_buf(),
            message: "image has no pixels".to_string(),
        });
    }

    debug!(
        "Loaded logo {:?} ({}x{})",
        path,
        decoded.width(),
        decoded.height()
    );

    Ok(Logo::from_rgba(decoded.to_rgba8()))
}

/// Composite transparent areas against a white background.
fn flatten_onto_white(image: RgbaImage) -> RgbImage {
    let mut flattened = RgbImage::new(image.width(), image.height());

    for (x, y, pixel) in image.enumerate_pixels() {
        let alpha = pixel[3] as f32 / 255.0;
        let inv_alpha = 1.0 - alpha;
        let blend = |c: u8| ((c as f32 * alpha) + (255.0 * inv_alpha)).round() as u8;
        flattened.put_pixel(x, y, Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }

    flattened
}

/// Pull every pixel `amount` of the way towards white.
fn lighten(image: &RgbImage, amount: f32) -> RgbImage {
    let mut lightened = image.clone();
    for pixel in lightened.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = (*channel as f32 + (255.0 - *channel as f32) * amount).round() as u8;
        }
    }
    lightened
}
