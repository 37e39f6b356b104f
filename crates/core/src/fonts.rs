//! Extended-script font registration and per-draw typeface selection.
//!
//! The card labels carry Serbian Latin diacritics (Č, Š, Ž, Đ) that the PDF
//! base-14 fonts cannot show. DejaVu Sans covers them, so it is preferred
//! whenever its regular and bold files can be registered. Registration is
//! done once per process by [`init_fonts`]; the outcome is kept in a
//! `OnceLock` and consulted by every render.

use crate::error::{CardError, Result};
use printpdf::{BuiltinFont, PdfDocument};
use std::io::Cursor;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// File name of the extended-script regular face.
pub const REGULAR_FONT_FILE: &str = "DejaVuSans.ttf";

/// File name of the extended-script bold face.
pub const BOLD_FONT_FILE: &str = "DejaVuSans-Bold.ttf";

/// Font weight variants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// The two families a card can be set in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// DejaVu Sans, embedded from TTF files.
    DejaVuSans,
    /// Helvetica, one of the PDF base-14 fonts.
    Helvetica,
}

/// A concrete face: family plus weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeFace {
    pub family: FontFamily,
    pub weight: FontWeight,
}

impl TypeFace {
    /// PostScript-style face name.
    pub fn name(&self) -> &'static str {
        match (self.family, self.weight) {
            (FontFamily::DejaVuSans, FontWeight::Regular) => "DejaVuSans",
            (FontFamily::DejaVuSans, FontWeight::Bold) => "DejaVuSans-Bold",
            (FontFamily::Helvetica, FontWeight::Regular) => "Helvetica",
            (FontFamily::Helvetica, FontWeight::Bold) => "Helvetica-Bold",
        }
    }

    /// The base-14 face of the same weight.
    pub fn builtin(&self) -> BuiltinFont {
        match self.weight {
            FontWeight::Regular => BuiltinFont::Helvetica,
            FontWeight::Bold => BuiltinFont::HelveticaBold,
        }
    }
}

/// Raw bytes of a validated regular/bold pair.
pub struct ExtendedFonts {
    regular: Vec<u8>,
    bold: Vec<u8>,
}

impl ExtendedFonts {
    /// Font file bytes for a weight.
    pub fn bytes(&self, weight: FontWeight) -> &[u8] {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

impl std::fmt::Debug for ExtendedFonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedFonts")
            .field("regular_bytes", &self.regular.len())
            .field("bold_bytes", &self.bold.len())
            .finish()
    }
}

/// Outcome of font registration.
#[derive(Debug)]
pub enum FontAvailability {
    /// DejaVu Sans regular and bold registered.
    Extended(ExtendedFonts),
    /// Registration failed or never ran; Helvetica is used.
    Fallback,
}

impl FontAvailability {
    /// Load and validate the DejaVu pair from `fonts_dir`.
    ///
    /// Never fails: any problem is logged and yields [`FontAvailability::Fallback`].
    pub fn load(fonts_dir: &Path) -> Self {
        match load_extended(fonts_dir) {
            Ok(fonts) => {
                info!("[OK] DejaVuSans fonts registered from {:?}", fonts_dir);
                FontAvailability::Extended(fonts)
            }
            Err(e) => {
                warn!("[WARNING] Font registration failed: {}, falling back to Helvetica", e);
                FontAvailability::Fallback
            }
        }
    }

    /// Family every text element will be drawn in.
    pub fn family(&self) -> FontFamily {
        match self {
            FontAvailability::Extended(_) => FontFamily::DejaVuSans,
            FontAvailability::Fallback => FontFamily::Helvetica,
        }
    }

    /// Pick the face for one text draw.
    pub fn select(&self, weight: FontWeight) -> TypeFace {
        TypeFace {
            family: self.family(),
            weight,
        }
    }

    /// Bytes for an extended face, `None` in fallback mode.
    pub fn font_bytes(&self, weight: FontWeight) -> Option<&[u8]> {
        match self {
            FontAvailability::Extended(fonts) => Some(fonts.bytes(weight)),
            FontAvailability::Fallback => None,
        }
    }

    /// Whether the extended-script faces are available.
    pub fn is_extended(&self) -> bool {
        matches!(self, FontAvailability::Extended(_))
    }
}

static REGISTRY: OnceLock<Arc<FontAvailability>> = OnceLock::new();

/// Register the extended-script fonts once for the whole process.
///
/// Only the first call reads `fonts_dir`; later calls return the stored
/// outcome regardless of their argument.
pub fn init_fonts(fonts_dir: impl AsRef<Path>) -> Arc<FontAvailability> {
    let fonts_dir = fonts_dir.as_ref();
    Arc::clone(REGISTRY.get_or_init(|| Arc::new(FontAvailability::load(fonts_dir))))
}

/// The registered fonts, or fallback mode if [`init_fonts`] never ran.
pub fn registered_fonts() -> Arc<FontAvailability> {
    match REGISTRY.get() {
        Some(fonts) => Arc::clone(fonts),
        None => {
            debug!("Fonts not initialized, using Helvetica");
            Arc::new(FontAvailability::Fallback)
        }
    }
}

fn load_extended(fonts_dir: &Path) -> Result<ExtendedFonts> {
    let regular = read_and_probe(&fonts_dir.join(REGULAR_FONT_FILE))?;
    let bold = read_and_probe(&fonts_dir.join(BOLD_FONT_FILE))?;
    Ok(ExtendedFonts { regular, bold })
}

/// Read a TTF file and make sure printpdf accepts it.
fn read_and_probe(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|e| CardError::FontRegistration {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    PdfDocument::empty("font-probe")
        .add_external_font(Cursor::new(bytes.as_slice()))
        .map_err(|e| CardError::FontRegistration {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!("Probed font {:?} ({} bytes)", path, bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_names() {
        let fallback = FontAvailability::Fallback;
        assert_eq!(fallback.select(FontWeight::Regular).name(), "Helvetica");
        assert_eq!(fallback.select(FontWeight::Bold).name(), "Helvetica-Bold");

        let extended = TypeFace {
            family: FontFamily::DejaVuSans,
            weight: FontWeight::Bold,
        };
        assert_eq!(extended.name(), "DejaVuSans-Bold");
    }

    #[test]
    fn test_builtin_keeps_weight() {
        let bold = TypeFace {
            family: FontFamily::DejaVuSans,
            weight: FontWeight::Bold,
        };
        assert!(matches!(bold.builtin(), BuiltinFont::HelveticaBold));
        let regular = FontAvailability::Fallback.select(FontWeight::Regular);
        assert!(matches!(regular.builtin(), BuiltinFont::Helvetica));
    }

    #[test]
    fn test_missing_fonts_dir_falls_back() {
        let fonts = FontAvailability::load(Path::new("/nonexistent/fonts"));
        assert!(!fonts.is_extended());
        assert_eq!(fonts.family(), FontFamily::Helvetica);
        assert!(fonts.font_bytes(FontWeight::Regular).is_none());
    }

    #[test]
    fn test_extended_selection() {
        let fonts = FontAvailability::Extended(ExtendedFonts {
            regular: vec![1, 2, 3],
            bold: vec![4, 5],
        });
        assert_eq!(fonts.family(), FontFamily::DejaVuSans);
        assert_eq!(fonts.select(FontWeight::Bold).weight, FontWeight::Bold);
        assert_eq!(fonts.font_bytes(FontWeight::Bold), Some(&[4u8, 5][..]));
    }
}
