//! Rendering for order documents
//!
//! This module separates what a page contains from how it is written:
//! - `DocumentSurface` is the drawing contract pages are rendered against
//! - `page` draws one order page onto any surface
//! - `writer` is the lopdf-backed surface that serializes the document

mod page;
mod writer;

pub use page::{PageContext, header_text, render_page};
pub use writer::PdfWriter;

use crate::constants::{HELVETICA_BOLD_CHAR_WIDTH_RATIO, HELVETICA_CHAR_WIDTH_RATIO};
use crate::layout::Rect;
use crate::types::Result;
use image::DynamicImage;

/// Built-in fonts used on order pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// Estimated advance of `text` at `size` points
    pub fn estimate_width(self, text: &str, size: f32) -> f32 {
        let ratio = match self {
            Font::Helvetica => HELVETICA_CHAR_WIDTH_RATIO,
            Font::HelveticaBold => HELVETICA_BOLD_CHAR_WIDTH_RATIO,
        };
        text.chars().count() as f32 * size * ratio
    }
}

/// Text direction on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRotation {
    /// Left to right
    None,
    /// Bottom to top (rotated 90° counter-clockwise)
    Ccw90,
}

/// A single line of text anchored at its baseline start
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: Font,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub rotation: TextRotation,
}

/// Drawing target for order pages.
///
/// Pages are started explicitly; every draw call goes to the most recently
/// started page.
pub trait DocumentSurface {
    /// Start a new page of the given size in points
    fn begin_page(&mut self, width: f32, height: f32) -> Result<()>;

    fn draw_text(&mut self, run: &TextRun) -> Result<()>;

    /// Draw `image` stretched to `rect`
    fn draw_image(&mut self, image: &DynamicImage, rect: Rect) -> Result<()>;

    /// Pages started so far
    fn page_count(&self) -> usize;
}
