//! Drawing backends for the card layout.
//!
//! - PDF: the real output, built with printpdf
//! - Recording: keeps the draw commands in memory for inspection

mod pdf;
mod recording;
mod traits;

pub use pdf::PdfCanvas;
pub use recording::RecordingCanvas;
pub use traits::{BorderStyle, CardCanvas, DrawCommand, TextStyle};
