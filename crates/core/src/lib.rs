//! # membership-card-core
//!
//! Renders a credit-card-sized membership card to a single-page PDF.
//!
//! The card carries a fixed organization header, the member's name, id and
//! join date (each drawn with a light offset shadow for an embossed look), a
//! QR code with the member data, an optional logo and a rounded border.
//!
//! - **printpdf** for the document
//! - **qrcode** for the QR matrix
//! - **image** for logo decoding
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use membership_card_core::{init_fonts, CardRenderer, CardRequest, RenderConfig};
//!
//! fn main() -> membership_card_core::Result<()> {
//!     // Optional: DejaVu Sans for Č, Ć, Š, Ž, Đ; Helvetica otherwise
//!     init_fonts("./fonts");
//!
//!     let renderer = CardRenderer::new(RenderConfig::default())?;
//!     let request = CardRequest::new("Ana", "Jovanović", "MBR-000017", "2023-09-01", "out/card.pdf")
//!         .with_logo("logo.png");
//!
//!     let card = renderer.render(&request)?;
//!     println!("Wrote {} bytes to {:?}", card.byte_len, card.output_path);
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod card_renderer;
pub mod config;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod logo;
pub mod qr;

// Re-export main types for convenience
pub use canvas::{BorderStyle, CardCanvas, DrawCommand, PdfCanvas, RecordingCanvas, TextStyle};
pub use card_renderer::CardRenderer;
pub use config::{CardRequest, DrawOutcome, ElementStatus, RenderConfig, RenderedCard};
pub use error::{CardError, Result};
pub use fonts::{init_fonts, registered_fonts, FontAvailability, FontFamily, FontWeight, TypeFace};
pub use layout::{display_name, format_join_date, CardGeometry};
pub use qr::qr_payload;

/// Initialize the library's logging.
///
/// Defaults to `info` unless `RUST_LOG` says otherwise. Calling it again, or
/// after another subscriber was installed, does nothing.
pub fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init();
}
