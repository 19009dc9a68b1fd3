//! Identifier encoder
//!
//! Turns the order identifier into a square PNG raster. The page renderer
//! only sees the [`IdentifierEncoder`] trait, so a failing or alternative
//! encoder can be swapped in without touching page assembly.

use crate::constants::DEFAULT_QR_SIZE_PX;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Luma, RgbaImage};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentifierError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Encodes an opaque payload into PNG bytes of `size_px` x `size_px` pixels.
pub trait IdentifierEncoder: Send + Sync {
    fn encode(&self, payload: &str, size_px: u32) -> Result<Vec<u8>, IdentifierError>;
}

/// QR encoder with medium error correction and automatic mode selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrEncoder;

impl IdentifierEncoder for QrEncoder {
    fn encode(&self, payload: &str, size_px: u32) -> Result<Vec<u8>, IdentifierError> {
        let size_px = clamp_size(size_px);
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)?;

        // The renderer rounds to whole modules; resample to the exact size.
        let symbol = code
            .render::<Luma<u8>>()
            .quiet_zone(true)
            .max_dimensions(size_px, size_px)
            .build();
        let symbol = imageops::resize(&symbol, size_px, size_px, FilterType::Nearest);

        // 8-bit RGBA keeps the raster in the same format as the blank fallback
        let rgba = DynamicImage::ImageLuma8(symbol).to_rgba8();
        encode_png(rgba)
    }
}

/// Encode `payload`, substituting a transparent raster on any failure.
pub fn encode_or_blank(encoder: &dyn IdentifierEncoder, payload: &str, size_px: u32) -> Vec<u8> {
    match encoder.encode(payload, size_px) {
        Ok(bytes) if !bytes.is_empty() => bytes,
        Ok(_) => {
            log::warn!("Identifier encoder returned no data, drawing a blank code");
            blank_png(size_px)
        }
        Err(e) => {
            log::warn!("Identifier encoding failed, drawing a blank code: {}", e);
            blank_png(size_px)
        }
    }
}

/// Fully transparent square raster, same format as a real code
pub fn blank_image(size_px: u32) -> RgbaImage {
    let size_px = clamp_size(size_px);
    RgbaImage::new(size_px, size_px)
}

/// PNG bytes of [`blank_image`]
pub fn blank_png(size_px: u32) -> Vec<u8> {
    encode_png(blank_image(size_px))
        .expect("PNG encoding of an in-memory raster into a Vec cannot fail")
}

fn clamp_size(size_px: u32) -> u32 {
    if size_px == 0 {
        DEFAULT_QR_SIZE_PX
    } else {
        size_px
    }
}

fn encode_png(image: RgbaImage) -> Result<Vec<u8>, IdentifierError> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
