//! Page geometry planning
//!
//! Decides, per line item, the page size, safety margin and artwork box.
//! Item print geometry wins where it is usable; everything else falls back
//! to the configured defaults. Nothing here can fail.
//!
//! All results are in points, in PDF user space (origin bottom-left).

use crate::constants::{MAX_PAGE_SIDE_PT, mm_to_pt};
use crate::options::OrderPdfConfig;
use crate::types::{LineItem, PrintGeometry};

/// Axis-aligned rectangle in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A `width` x `height` rect centered on a page
    pub fn centered(page_width: f32, page_height: f32, width: f32, height: f32) -> Self {
        Self::new(
            (page_width - width) / 2.0,
            (page_height - height) / 2.0,
            width,
            height,
        )
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Y of the top edge measured from the top of the page
    pub fn top_down_y(&self, page_height: f32) -> f32 {
        page_height - self.top()
    }
}

/// Geometry of one physical page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub artwork_width: f32,
    pub artwork_height: f32,
}

impl PageGeometry {
    /// The artwork box, centered on the page
    pub fn artwork_box(&self) -> Rect {
        Rect::centered(
            self.page_width,
            self.page_height,
            self.artwork_width,
            self.artwork_height,
        )
    }

    /// Square identifier code anchored bottom-left inside the margin
    pub fn code_rect(&self, size: f32) -> Rect {
        Rect::new(self.margin, self.margin, size, size)
    }

    /// Whether two pages share a media size (within a tenth of a point)
    pub fn same_size(&self, other: &PageGeometry) -> bool {
        (self.page_width - other.page_width).abs() <= 0.1
            && (self.page_height - other.page_height).abs() <= 0.1
    }
}

/// Placement of a scaled image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    pub scale: f32,
    pub rect: Rect,
}

/// Plan the page for a line item.
pub fn plan_page(item: &LineItem, config: &OrderPdfConfig) -> PageGeometry {
    plan_geometry(item.print_template.as_ref(), config)
}

/// Plan a page from optional print geometry.
pub fn plan_geometry(template: Option<&PrintGeometry>, config: &OrderPdfConfig) -> PageGeometry {
    let default_width = mm_to_pt(config.page_width_mm);
    let default_height = mm_to_pt(config.page_height_mm);
    let default_margin = mm_to_pt(config.margin_mm);

    // 1. Page size: both dimensions or neither, within the PDF page limit
    let (page_width, page_height) = template
        .and_then(|t| positive_pair(t.page_width_mm, t.page_height_mm))
        .map(|(w, h)| (mm_to_pt(w), mm_to_pt(h)))
        .filter(|&(w, h)| w.max(h) <= MAX_PAGE_SIDE_PT)
        .unwrap_or((default_width, default_height));

    // 2. Margin: must leave a printable area on this page
    let margin = template
        .and_then(|t| t.margin_bottom_mm)
        .filter(|m| m.is_finite() && *m >= 0.0)
        .map(mm_to_pt)
        .filter(|m| 2.0 * m < page_width.min(page_height))
        .unwrap_or(default_margin);
    let margin = if 2.0 * margin < page_width.min(page_height) {
        margin
    } else {
        0.0
    };

    let usable_width = page_width - 2.0 * margin;
    let usable_height = page_height - 2.0 * margin;

    // 3. Artwork box: exact template size, capped to the usable area
    let (artwork_width, artwork_height) = match template
        .and_then(|t| positive_pair(t.artwork_width_mm, t.artwork_height_mm))
    {
        Some((w, h)) => (mm_to_pt(w).min(usable_width), mm_to_pt(h).min(usable_height)),
        None => {
            let banded_height = usable_height - mm_to_pt(config.header_band_mm);
            if banded_height > 0.0 {
                (usable_width, banded_height)
            } else {
                (usable_width, usable_height)
            }
        }
    };

    PageGeometry {
        page_width,
        page_height,
        margin,
        artwork_width,
        artwork_height,
    }
}

/// Scale an image to fit inside `bounds`, preserving aspect ratio, and center it.
///
/// A zero image dimension is treated as one pixel.
pub fn fit_image(bounds: &Rect, image_width: u32, image_height: u32) -> ImagePlacement {
    let image_width = image_width.max(1) as f32;
    let image_height = image_height.max(1) as f32;

    let scale = (bounds.width / image_width).min(bounds.height / image_height);
    let width = image_width * scale;
    let height = image_height * scale;

    ImagePlacement {
        scale,
        rect: Rect::new(
            bounds.x + (bounds.width - width) / 2.0,
            bounds.y + (bounds.height - height) / 2.0,
            width,
            height,
        ),
    }
}

fn positive_pair(a: Option<f32>, b: Option<f32>) -> Option<(f32, f32)> {
    let (a, b) = (a?, b?);
    let usable = |v: f32| v.is_finite() && v > 0.0;
    if usable(a) && usable(b) {
        Some((a, b))
    } else {
        None
    }
}
