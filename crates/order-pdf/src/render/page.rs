//! One order page
//!
//! Layout, in PDF user space:
//! - Bold header `"{order} ({page}/{total})"` running up the left edge
//! - Product info line running up the right edge
//! - Artwork fitted into the artwork box, centered on the page
//! - Identifier code in the bottom-left corner, inside the margin
//!
//! Every asset problem degrades to a fallback; only surface errors propagate.

use super::{DocumentSurface, Font, TextRotation, TextRun};
use crate::artwork::{ArtworkResolver, ArtworkSource};
use crate::constants::TEXT_EDGE_OFFSET_PT;
use crate::layout::{PageGeometry, fit_image};
use crate::options::OrderPdfConfig;
use crate::placeholder::placeholder_image;
use crate::qr::{IdentifierEncoder, blank_image, encode_or_blank};
use crate::types::{LineItem, OrderDocumentRequest, Result};
use image::DynamicImage;

/// Everything needed to draw one page
pub struct PageContext<'a> {
    pub request: &'a OrderDocumentRequest,
    pub item: &'a LineItem,
    pub geometry: PageGeometry,
    /// 1-based page number
    pub page_number: usize,
    pub total_pages: usize,
    pub config: &'a OrderPdfConfig,
    pub resolver: &'a ArtworkResolver<'a>,
    pub encoder: &'a dyn IdentifierEncoder,
}

/// Header label for a page
pub fn header_text(order_number: &str, page_number: usize, total_pages: usize) -> String {
    format!("{} ({}/{})", order_number, page_number, total_pages)
}

/// Render one page onto the surface's current page.
///
/// Returns where the artwork came from.
pub fn render_page(surface: &mut dyn DocumentSurface, ctx: &PageContext<'_>) -> Result<ArtworkSource> {
    let geometry = &ctx.geometry;
    let font_size = ctx.config.font_size_pt;

    // Left: order number and page counter
    let header = header_text(
        ctx.request.display_order_number(),
        ctx.page_number,
        ctx.total_pages,
    );
    surface.draw_text(&vertical_run(
        header,
        Font::HelveticaBold,
        font_size,
        geometry.margin + TEXT_EDGE_OFFSET_PT,
        geometry.page_height,
    ))?;

    // Right: product info
    if let Some(info) = ctx.item.product_info_line() {
        surface.draw_text(&vertical_run(
            info,
            Font::Helvetica,
            font_size,
            geometry.page_width - geometry.margin - TEXT_EDGE_OFFSET_PT,
            geometry.page_height,
        ))?;
    }

    // Center: artwork
    let artwork = ctx.resolver.resolve(ctx.request.owner_id, ctx.item);
    let mut source = artwork.source;
    let image = match image::load_from_memory(&artwork.bytes) {
        Ok(image) => image,
        Err(e) => {
            log::warn!(
                "Artwork for page {} of order {} does not decode, using placeholder: {}",
                ctx.page_number,
                ctx.request.display_order_number(),
                e
            );
            source = ArtworkSource::Placeholder;
            DynamicImage::ImageRgb8(placeholder_image())
        }
    };
    let placement = fit_image(&geometry.artwork_box(), image.width(), image.height());
    surface.draw_image(&image, placement.rect)?;

    // Bottom-left: identifier code
    if !ctx.request.id.is_empty() {
        let size_px = ctx.config.qr_size_px;
        let png = encode_or_blank(ctx.encoder, &ctx.request.id, size_px);
        let code = image::load_from_memory(&png).unwrap_or_else(|e| {
            log::warn!("Identifier raster does not decode, drawing a blank code: {}", e);
            DynamicImage::ImageRgba8(blank_image(size_px))
        });
        surface.draw_image(&code, geometry.code_rect(ctx.config.qr_size_pt))?;
    }

    Ok(source)
}

/// Bottom-to-top text at baseline `x`, centered vertically on the page
fn vertical_run(text: String, font: Font, size: f32, x: f32, page_height: f32) -> TextRun {
    let width = font.estimate_width(&text, size);
    TextRun {
        y: (page_height - width) / 2.0,
        text,
        font,
        size,
        x,
        rotation: TextRotation::Ccw90,
    }
}
