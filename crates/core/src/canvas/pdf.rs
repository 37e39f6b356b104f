//! PDF backend built on printpdf.

use super::traits::{BorderStyle, CardCanvas, TextStyle};
use crate::error::{CardError, Result};
use crate::fonts::{FontAvailability, FontFamily, FontWeight, TypeFace};
use crate::layout::{CardGeometry, Color, Rect, RoundedRect};
use image::RgbImage;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef, Line, Mm,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Polygon, Px, Rgb,
};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;
use tracing::{debug, warn};

const MM_PER_INCH: f32 = 25.4;

/// A single-page PDF sized to the card plus its margins.
pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Arc<FontAvailability>,
    /// Faces already added to the document.
    loaded: HashMap<TypeFace, IndirectFontRef>,
}

impl PdfCanvas {
    /// Create the document and register the regular and bold faces.
    pub fn new(title: &str, geometry: &CardGeometry, fonts: Arc<FontAvailability>) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm(geometry.page_width()),
            Mm(geometry.page_height()),
            "Card",
        );
        let layer = doc.get_page(page).get_layer(layer);

        let mut canvas = Self {
            doc,
            layer,
            fonts,
            loaded: HashMap::new(),
        };

        for weight in [FontWeight::Regular, FontWeight::Bold] {
            let face = canvas.fonts.select(weight);
            canvas.font_for(face)?;
        }

        debug!(
            "Created {:.2}x{:.2} mm card document",
            geometry.page_width(),
            geometry.page_height()
        );

        Ok(canvas)
    }

    /// Serialize the finished document.
    pub fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| CardError::Serialization(e.to_string()))
    }

    /// Resolve a face to a document font, adding it on first use.
    ///
    /// An extended face that printpdf refuses is replaced by the base-14
    /// face of the same weight.
    fn font_for(&mut self, face: TypeFace) -> Result<IndirectFontRef> {
        if let Some(font) = self.loaded.get(&face) {
            return Ok(font.clone());
        }

        let external = match face.family {
            FontFamily::DejaVuSans => self.fonts.font_bytes(face.weight),
            FontFamily::Helvetica => None,
        };

        let font = match external {
            Some(bytes) => match self.doc.add_external_font(Cursor::new(bytes)) {
                Ok(font) => font,
                Err(e) => {
                    warn!(
                        "[WARNING] Could not embed {}: {}, using Helvetica",
                        face.name(),
                        e
                    );
                    self.doc.add_builtin_font(face.builtin())?
                }
            },
            None => self.doc.add_builtin_font(face.builtin())?,
        };

        self.loaded.insert(face, font.clone());
        Ok(font)
    }
}

fn pdf_color(color: Color) -> printpdf::Color {
    printpdf::Color::Rgb(Rgb::new(color.r, color.g, color.b, None))
}

fn outline_points(shape: &RoundedRect) -> Vec<(Point, bool)> {
    shape
        .outline()
        .into_iter()
        .map(|(x, y)| (Point::new(Mm(x), Mm(y)), false))
        .collect()
}

impl CardCanvas for PdfCanvas {
    fn fill_rounded_rect(&mut self, shape: &RoundedRect, color: Color) -> Result<()> {
        self.layer.set_fill_color(pdf_color(color));
        self.layer.add_polygon(Polygon {
            rings: vec![outline_points(shape)],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
        Ok(())
    }

    fn stroke_rounded_rect(&mut self, shape: &RoundedRect, border: &BorderStyle) -> Result<()> {
        self.layer.set_outline_color(pdf_color(border.color));
        self.layer.set_outline_thickness(border.width_pt);
        self.layer.add_line(Line {
            points: outline_points(shape),
            is_closed: true,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) -> Result<()> {
        let font = self.font_for(style.face)?;
        self.layer.set_fill_color(pdf_color(style.color));
        self.layer.use_text(text, style.size_pt, Mm(x), Mm(y), &font);
        Ok(())
    }

    fn draw_image(&mut self, image: &RgbImage, placement: Rect) -> Result<()> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CardError::ImageEmbed("image has no pixels".to_string()));
        }
        if placement.width <= 0.0 || placement.height <= 0.0 {
            return Err(CardError::ImageEmbed(format!(
                "invalid placement {:.2}x{:.2} mm",
                placement.width, placement.height
            )));
        }

        let xobject = Image::from(ImageXObject {
            width: Px(width as usize),
            height: Px(height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: false,
            image_data: image.as_raw().clone(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // printpdf sizes images by DPI; pick the one that maps the pixel
        // width onto the placement width.
        let dpi = width as f32 / (placement.width / MM_PER_INCH);

        xobject.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(placement.x)),
                translate_y: Some(Mm(placement.y)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::{BOLD_FONT_FILE, REGULAR_FONT_FILE};
    use std::path::PathBuf;

    /// A directory holding both DejaVu Sans faces, if this machine has one.
    fn dejavu_dir() -> Option<PathBuf> {
        let mut candidates: Vec<PathBuf> = std::env::var_os("DEJAVU_FONTS_DIR")
            .map(PathBuf::from)
            .into_iter()
            .collect();
        candidates.extend(
            [
                "/usr/share/fonts/truetype/dejavu",
                "/usr/share/fonts/dejavu",
                "/usr/share/fonts/TTF",
                "/usr/local/share/fonts",
            ]
            .iter()
            .map(PathBuf::from),
        );

        candidates.into_iter().find(|dir| {
            dir.join(REGULAR_FONT_FILE).is_file() && dir.join(BOLD_FONT_FILE).is_file()
        })
    }

    fn has_embedded_truetype(bytes: &[u8]) -> bool {
        let doc = lopdf::Document::load_mem(bytes).unwrap();
        doc.objects
            .values()
            .any(|obj| obj.as_dict().map(|d| d.has(b"FontFile2")).unwrap_or(false))
    }

    fn fallback_canvas() -> PdfCanvas {
        PdfCanvas::new(
            "test",
            &CardGeometry::standard(),
            Arc::new(FontAvailability::Fallback),
        )
        .unwrap()
    }

    #[test]
    fn test_new_registers_base_faces() {
        let canvas = fallback_canvas();
        assert_eq!(canvas.loaded.len(), 2);
    }

    #[test]
    fn test_font_for_is_cached() {
        let mut canvas = fallback_canvas();
        let face = canvas.fonts.select(FontWeight::Bold);
        canvas.font_for(face).unwrap();
        canvas.font_for(face).unwrap();
        assert_eq!(canvas.loaded.len(), 2);
    }

    #[test]
    fn test_extended_face_without_bytes_uses_builtin() {
        let mut canvas = fallback_canvas();
        let face = TypeFace {
            family: FontFamily::DejaVuSans,
            weight: FontWeight::Regular,
        };
        assert!(canvas.font_for(face).is_ok());
    }

    #[test]
    fn test_draw_image_rejects_empty_raster() {
        let mut canvas = fallback_canvas();
        let result = canvas.draw_image(&RgbImage::new(0, 0), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(matches!(result, Err(CardError::ImageEmbed(_))));
    }

    #[test]
    fn test_draw_image_rejects_degenerate_placement() {
        let mut canvas = fallback_canvas();
        let result = canvas.draw_image(&RgbImage::new(4, 4), Rect::new(0.0, 0.0, 0.0, 10.0));
        assert!(matches!(result, Err(CardError::ImageEmbed(_))));
    }

    #[test]
    fn test_finish_produces_pdf() {
        let mut canvas = fallback_canvas();
        let face = CardGeometry::standard().card_face();
        canvas.fill_rounded_rect(&face, Color::WHITE).unwrap();
        canvas
            .stroke_rounded_rect(&face, &BorderStyle::default())
            .unwrap();

        let bytes = canvas.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_extended_faces_embed_dejavu() {
        let Some(dir) = dejavu_dir() else {
            eprintln!("Skipping test: DejaVu Sans not found (set DEJAVU_FONTS_DIR)");
            return;
        };

        let fonts = Arc::new(FontAvailability::load(&dir));
        assert!(fonts.is_extended());

        let mut canvas = PdfCanvas::new("test", &CardGeometry::standard(), fonts).unwrap();
        assert!(canvas
            .loaded
            .keys()
            .all(|face| face.family == FontFamily::DejaVuSans));

        let style = TextStyle {
            face: canvas.fonts.select(FontWeight::Bold),
            size_pt: 9.0,
            color: Color::TEXT,
        };
        canvas
            .draw_text("BROJ ČLANSKE KARTE: ĐORĐE ŠĆEPANOVIĆ", 10.0, 10.0, &style)
            .unwrap();

        let bytes = canvas.finish().unwrap();
        assert!(has_embedded_truetype(&bytes));
    }

    #[test]
    fn test_fallback_faces_are_not_embedded() {
        let bytes = fallback_canvas().finish().unwrap();
        assert!(!has_embedded_truetype(&bytes));
    }
}
