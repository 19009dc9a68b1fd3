//! Deterministic fallback artwork
//!
//! Used whenever an item has no artwork, the loader cannot supply it, or
//! the supplied bytes do not decode.

use crate::constants::{
    PLACEHOLDER_BORDER_RGB, PLACEHOLDER_FILL_RGB, PLACEHOLDER_HEIGHT_PX, PLACEHOLDER_WIDTH_PX,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::OnceLock;

static PLACEHOLDER_PNG: OnceLock<Vec<u8>> = OnceLock::new();

/// The placeholder raster: flat light gray with a one-pixel dark gray border.
pub fn placeholder_image() -> RgbImage {
    let (width, height) = (PLACEHOLDER_WIDTH_PX, PLACEHOLDER_HEIGHT_PX);
    let mut image = RgbImage::from_pixel(width, height, Rgb(PLACEHOLDER_FILL_RGB));

    let border = Rgb(PLACEHOLDER_BORDER_RGB);
    for x in 0..width {
        image.put_pixel(x, 0, border);
        image.put_pixel(x, height - 1, border);
    }
    for y in 0..height {
        image.put_pixel(0, y, border);
        image.put_pixel(width - 1, y, border);
    }

    image
}

/// PNG bytes of [`placeholder_image`]. Encoded once, identical on every call.
pub fn placeholder_png() -> &'static [u8] {
    PLACEHOLDER_PNG.get_or_init(|| {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(placeholder_image())
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("PNG encoding of an in-memory raster into a Vec cannot fail");
        bytes
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_dimensions_and_colors() {
        let image = placeholder_image();
        assert_eq!(image.dimensions(), (400, 300));
        assert_eq!(image.get_pixel(0, 0).0, PLACEHOLDER_BORDER_RGB);
        assert_eq!(image.get_pixel(399, 299).0, PLACEHOLDER_BORDER_RGB);
        assert_eq!(image.get_pixel(200, 150).0, PLACEHOLDER_FILL_RGB);
        assert_eq!(image.get_pixel(1, 1).0, PLACEHOLDER_FILL_RGB);
    }

    #[test]
    fn test_placeholder_png_decodes_to_placeholder() {
        let decoded = image::load_from_memory(placeholder_png()).unwrap().to_rgb8();
        assert_eq!(decoded, placeholder_image());
    }

    #[test]
    fn test_placeholder_png_is_stable() {
        assert!(!placeholder_png().is_empty());
        assert_eq!(placeholder_png(), placeholder_png());
    }
}
