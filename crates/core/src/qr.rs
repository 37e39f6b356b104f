//! QR payload, matrix rasterization and scratch-file staging.
//!
//! The raster takes a round trip through a PNG scratch file before it is
//! embedded. The file is created fresh for each card and is removed on every
//! path, including errors (the `NamedTempFile` guard deletes it on drop).

use crate::error::{CardError, Result};
use image::{GrayImage, Luma, RgbImage};
use qrcode::QrCode;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::Builder;
use tracing::{debug, warn};

/// Light modules around the symbol on every side.
pub const QUIET_ZONE_MODULES: u32 = 4;

/// Pipe-delimited string encoded into the QR matrix.
pub fn qr_payload(member_id: &str, first_name: &str, last_name: &str) -> String {
    format!(
        "MEMBER_ID:{}|NAME:{}|LASTNAME:{}",
        member_id, first_name, last_name
    )
}

/// Encode `payload` as a black-on-white raster with a quiet zone.
///
/// The symbol version is chosen to fit the payload.
pub fn encode_qr(payload: &str, module_pixels: u32) -> Result<GrayImage> {
    let code =
        QrCode::new(payload.as_bytes()).map_err(|e| CardError::QrEncoding(e.to_string()))?;

    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(module_pixels, module_pixels)
        .dark_color(Luma([0]))
        .light_color(Luma([255]))
        .quiet_zone(true)
        .build();

    debug!(
        "Encoded {} byte QR payload as {}x{} modules ({}x{} px)",
        payload.len(),
        code.width(),
        code.width(),
        image.width(),
        image.height()
    );

    Ok(image)
}

/// Write the raster to a scratch PNG and read it back as RGB.
pub fn stage_qr_raster(image: &GrayImage, temp_dir: Option<&Path>) -> Result<RgbImage> {
    let mut builder = Builder::new();
    builder.prefix("card-qr-").suffix(".png");
    let scratch = match temp_dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(|e| CardError::QrStaging(format!("Failed to create scratch file: {}", e)))?;

    debug!("Staging QR raster at {:?}", scratch.path());

    let mut writer = BufWriter::new(scratch.as_file());
    encode_gray_png(&mut writer, image)?;
    writer
        .flush()
        .map_err(|e| CardError::QrStaging(format!("Failed to flush scratch file: {}", e)))?;
    drop(writer);

    let staged = image::open(scratch.path())
        .map_err(|e| CardError::QrStaging(format!("Failed to read back scratch file: {}", e)))?
        .to_rgb8();

    if let Err(e) = scratch.close() {
        warn!("[WARNING] Failed to remove QR scratch file: {}", e);
    }

    Ok(staged)
}

/// Grayscale PNG encoding straight through the `png` crate.
fn encode_gray_png<W: Write>(writer: W, image: &GrayImage) -> Result<()> {
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Fast);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| CardError::QrStaging(format!("Failed to write PNG header: {}", e)))?;

    png_writer
        .write_image_data(image.as_raw())
        .map_err(|e| CardError::QrStaging(format!("Failed to write PNG data: {}", e)))?;

    png_writer
        .finish()
        .map_err(|e| CardError::QrStaging(format!("Failed to finish PNG: {}", e)))
}
