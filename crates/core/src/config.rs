//! Configuration, request and result types for card rendering.

use crate::fonts::FontFamily;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest QR module edge in pixels; beyond this the staged raster grows
/// without improving a 17 mm print.
pub const MAX_QR_MODULE_PIXELS: u32 = 40;

/// Configuration for the card renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Title written into the PDF document info.
    /// Default: "Membership Card".
    pub document_title: String,

    /// Directory for the QR scratch raster.
    /// Default: system temp directory.
    pub temp_dir: Option<PathBuf>,

    /// Edge length of one QR module in the staged raster, in pixels.
    /// Default: 10.
    pub qr_module_pixels: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            document_title: "Membership Card".to_string(),
            temp_dir: None,
            qr_module_pixels: 10,
        }
    }
}

impl RenderConfig {
    /// Set the document title.
    pub fn document_title(mut self, title: impl Into<String>) -> Self {
        self.document_title = title.into();
        self
    }

    /// Set the scratch directory used for QR staging.
    pub fn temp_dir(mut self, dir: PathBuf) -> Self {
        self.temp_dir = Some(dir);
        self
    }

    /// Set the QR module size in pixels.
    pub fn qr_module_pixels(mut self, pixels: u32) -> Self {
        self.qr_module_pixels = pixels;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.document_title.trim().is_empty() {
            return Err(crate::error::CardError::InvalidConfig(
                "document_title must not be empty".to_string(),
            ));
        }
        if self.qr_module_pixels == 0 || self.qr_module_pixels > MAX_QR_MODULE_PIXELS {
            return Err(crate::error::CardError::InvalidConfig(format!(
                "qr_module_pixels must be between 1 and {}",
                MAX_QR_MODULE_PIXELS
            )));
        }
        Ok(())
    }
}

/// Member data and destination for a single card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRequest {
    /// Given name, upper-cased on the card.
    pub first_name: String,

    /// Family name, upper-cased on the card.
    pub last_name: String,

    /// Membership identifier, printed verbatim.
    pub member_id: String,

    /// Join date, ISO `YYYY-MM-DD` expected. Anything else is printed as-is.
    pub join_date: String,

    /// Where the PDF is written. The parent directory is created if missing.
    pub output_path: PathBuf,

    /// Optional logo raster. A path that does not exist is skipped silently.
    pub logo_path: Option<PathBuf>,
}

impl CardRequest {
    /// Create a new card request without a logo.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        member_id: impl Into<String>,
        join_date: impl Into<String>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            member_id: member_id.into(),
            join_date: join_date.into(),
            output_path: output_path.into(),
            logo_path: None,
        }
    }

    /// Attach a logo image.
    pub fn with_logo(mut self, logo_path: impl Into<PathBuf>) -> Self {
        self.logo_path = Some(logo_path.into());
        self
    }

    /// The logo path, if one was given and it exists on disk.
    pub fn existing_logo(&self) -> Option<&Path> {
        self.logo_path.as_deref().filter(|path| path.exists())
    }
}

/// What happened to one optional card element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementStatus {
    /// The element was drawn.
    Drawn,
    /// The element was not requested (or its source does not exist).
    Skipped,
    /// The element failed and was left out; the message was logged.
    Failed(String),
}

impl ElementStatus {
    /// Whether the element made it onto the card.
    pub fn is_drawn(&self) -> bool {
        matches!(self, ElementStatus::Drawn)
    }
}

/// Result of drawing the layout onto a canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    /// QR code status.
    pub qr_code: ElementStatus,
    /// Logo status.
    pub logo: ElementStatus,
    /// Family used for every text element.
    pub font_family: FontFamily,
}

/// A finished card written to disk.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    /// Path of the written PDF.
    pub output_path: PathBuf,

    /// Page width in millimetres (card plus margins).
    pub page_width_mm: f32,

    /// Page height in millimetres (card plus margins).
    pub page_height_mm: f32,

    /// Size of the written file.
    pub byte_len: usize,

    /// Per-element outcome of the drawing pass.
    pub outcome: DrawOutcome,

    /// Processing time.
    pub duration: Duration,
}
