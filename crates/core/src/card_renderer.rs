//! The card layout routine and the file-writing front end around it.
//!
//! Drawing order is fixed: background, header, member block, QR code, logo
//! (shadow then primary), border. Every text element is embossed: a light
//! copy offset down and to the right, then the primary copy on top of it.

use crate::canvas::{BorderStyle, CardCanvas, PdfCanvas, TextStyle};
use crate::config::{CardRequest, DrawOutcome, ElementStatus, RenderConfig, RenderedCard};
use crate::error::{CardError, Result};
use crate::fonts::{registered_fonts, FontAvailability};
use crate::layout::{
    display_name, fit_within, format_join_date, CardGeometry, Color, TextSlot, HEADER_SUBTITLE,
    HEADER_TITLE, JOIN_DATE_LABEL, LOGO_SHADOW_OFFSET_MM, MEMBER_ID_LABEL, NAME_LABEL,
};
use crate::logo::load_logo;
use crate::qr::{encode_qr, qr_payload, stage_qr_raster};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tempfile::Builder;
use tracing::{debug, error, info, warn};

/// Renders membership cards.
///
/// Holds no per-card state; one renderer can produce any number of cards.
pub struct CardRenderer {
    config: RenderConfig,
    geometry: CardGeometry,
    fonts: Arc<FontAvailability>,
}

impl CardRenderer {
    /// Create a renderer using the process-wide font registration.
    ///
    /// Call [`crate::init_fonts`] first to get the extended-script faces;
    /// otherwise Helvetica is used.
    pub fn new(config: RenderConfig) -> Result<Self> {
        Self::with_fonts(config, registered_fonts())
    }

    /// Create a renderer with an explicit font registration outcome.
    pub fn with_fonts(config: RenderConfig, fonts: Arc<FontAvailability>) -> Result<Self> {
        config.validate()?;

        debug!(
            "Card renderer ready: fonts={:?}, qr_module_pixels={}",
            fonts.family(),
            config.qr_module_pixels
        );

        Ok(Self {
            config,
            geometry: CardGeometry::standard(),
            fonts,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn geometry(&self) -> &CardGeometry {
        &self.geometry
    }

    /// Render the card and write it to `request.output_path`.
    ///
    /// The parent directory is created if needed. The file is written
    /// through a temp file in the same directory and renamed into place, so
    /// a failed save leaves nothing at the destination.
    pub fn render(&self, request: &CardRequest) -> Result<RenderedCard> {
        let start = Instant::now();

        match self.render_to_file(request) {
            Ok((byte_len, outcome)) => {
                info!(
                    "Card written to {:?} ({} bytes) in {:?}",
                    request.output_path,
                    byte_len,
                    start.elapsed()
                );
                Ok(RenderedCard {
                    output_path: request.output_path.clone(),
                    page_width_mm: self.geometry.page_width(),
                    page_height_mm: self.geometry.page_height(),
                    byte_len,
                    outcome,
                    duration: start.elapsed(),
                })
            }
            Err(e) => {
                error!("Card rendering failed for {:?}: {}", request.output_path, e);
                Err(e)
            }
        }
    }

    /// Render the card into memory. `request.output_path` is ignored.
    pub fn render_to_bytes(&self, request: &CardRequest) -> Result<Vec<u8>> {
        self.build_document(request).map(|(bytes, _)| bytes)
    }

    /// Draw the full layout onto `canvas`.
    ///
    /// QR and logo failures are logged and reported in the outcome; any
    /// other canvas error is returned.
    pub fn draw_card<C: CardCanvas>(
        &self,
        canvas: &mut C,
        request: &CardRequest,
    ) -> Result<DrawOutcome> {
        let g = &self.geometry;

        canvas.fill_rounded_rect(&g.card_face(), Color::WHITE)?;

        self.draw_embossed(canvas, HEADER_TITLE, g.header_title())?;
        self.draw_embossed(canvas, HEADER_SUBTITLE, g.header_subtitle())?;

        let name = display_name(&request.first_name, &request.last_name);
        let joined = format_join_date(&request.join_date);

        self.draw_embossed(canvas, NAME_LABEL, g.name_label())?;
        self.draw_embossed(canvas, &name, g.name_value())?;
        self.draw_embossed(canvas, MEMBER_ID_LABEL, g.member_id_label())?;
        self.draw_embossed(canvas, &request.member_id, g.member_id_value())?;
        self.draw_embossed(canvas, JOIN_DATE_LABEL, g.join_date_label())?;
        self.draw_embossed(canvas, &joined, g.join_date_value())?;

        let qr_code = match self.draw_qr(canvas, request) {
            Ok(()) => ElementStatus::Drawn,
            Err(e) => {
                warn!("[WARNING] QR code generation error: {}", e);
                ElementStatus::Failed(e.to_string())
            }
        };

        let logo = match request.existing_logo() {
            Some(path) => match self.draw_logo(canvas, path) {
                Ok(()) => ElementStatus::Drawn,
                Err(e) => {
                    warn!("[WARNING] Logo error: {}", e);
                    ElementStatus::Failed(e.to_string())
                }
            },
            None => {
                if let Some(path) = &request.logo_path {
                    debug!("Logo {:?} not found, leaving logo area blank", path);
                }
                ElementStatus::Skipped
            }
        };

        canvas.stroke_rounded_rect(&g.card_face(), &BorderStyle::default())?;

        Ok(DrawOutcome {
            qr_code,
            logo,
            font_family: self.fonts.family(),
        })
    }

    fn build_document(&self, request: &CardRequest) -> Result<(Vec<u8>, DrawOutcome)> {
        let mut canvas = PdfCanvas::new(
            &self.config.document_title,
            &self.geometry,
            Arc::clone(&self.fonts),
        )?;
        let outcome = self.draw_card(&mut canvas, request)?;
        let bytes = canvas.finish()?;
        Ok((bytes, outcome))
    }

    fn render_to_file(&self, request: &CardRequest) -> Result<(usize, DrawOutcome)> {
        let output_dir = output_dir_of(&request.output_path);
        std::fs::create_dir_all(&output_dir).map_err(|e| CardError::OutputDirError {
            path: output_dir.clone(),
            message: e.to_string(),
        })?;

        let (bytes, outcome) = self.build_document(request)?;
        write_atomically(&output_dir, &request.output_path, &bytes)?;

        Ok((bytes.len(), outcome))
    }

    /// Shadow copy first, then the primary copy at the nominal origin.
    fn draw_embossed<C: CardCanvas>(&self, canvas: &mut C, text: &str, slot: TextSlot) -> Result<()> {
        let face = self.fonts.select(slot.weight);
        let (shadow_x, shadow_y) = slot.shadow_origin();

        canvas.draw_text(
            text,
            shadow_x,
            shadow_y,
            &TextStyle {
                face,
                size_pt: slot.size_pt,
                color: Color::SHADOW,
            },
        )?;
        canvas.draw_text(
            text,
            slot.x,
            slot.y,
            &TextStyle {
                face,
                size_pt: slot.size_pt,
                color: Color::TEXT,
            },
        )
    }

    fn draw_qr<C: CardCanvas>(&self, canvas: &mut C, request: &CardRequest) -> Result<()> {
        let payload = qr_payload(&request.member_id, &request.first_name, &request.last_name);
        let matrix = encode_qr(&payload, self.config.qr_module_pixels)?;
        let raster = stage_qr_raster(&matrix, self.config.temp_dir.as_deref())?;
        let placement = fit_within(self.geometry.qr_box(), raster.width(), raster.height());
        canvas.draw_image(&raster, placement)
    }

    fn draw_logo<C: CardCanvas>(&self, canvas: &mut C, path: &Path) -> Result<()> {
        let logo = load_logo(path)?;
        let placement = fit_within(self.geometry.logo_box(), logo.width(), logo.height());

        let shadow = placement.offset(LOGO_SHADOW_OFFSET_MM, -LOGO_SHADOW_OFFSET_MM);
        if let Err(e) = canvas.draw_image(&logo.shadow, shadow) {
            debug!("Logo shadow skipped: {}", e);
        }

        canvas.draw_image(&logo.primary, placement)
    }
}

/// Directory the card is written into; `.` for a bare file name.
fn output_dir_of(output_path: &Path) -> PathBuf {
    match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn write_atomically(dir: &Path, output_path: &Path, bytes: &[u8]) -> Result<()> {
    let save_failed = |message: String| CardError::SaveFailed {
        path: output_path.to_path_buf(),
        message,
    };

    let mut staged = Builder::new()
        .prefix(".card-")
        .suffix(".pdf.part")
        .tempfile_in(dir)
        .map_err(|e| save_failed(e.to_string()))?;

    staged
        .write_all(bytes)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| save_failed(e.to_string()))?;

    // Temp files are created owner-only; a card is an ordinary document.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
        {
            debug!("Could not relax permissions on {:?}: {}", staged.path(), e);
        }
    }

    staged
        .persist(output_path)
        .map_err(|e| save_failed(e.error.to_string()))?;

    Ok(())
}
