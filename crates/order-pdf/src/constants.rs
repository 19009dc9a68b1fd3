//! Shared constants for order document generation
//!
//! This module centralizes unit conversion and the fixed layout numbers
//! used by the planner and the page renderer.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.834645

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

/// Largest page side a PDF viewer has to accept (200 inches)
pub const MAX_PAGE_SIDE_PT: f32 = 14400.0;

// =============================================================================
// Text Placement
// =============================================================================

/// Distance from the margin to the baseline of the rotated side texts (points)
pub const TEXT_EDGE_OFFSET_PT: f32 = 15.0;

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Approximate character width ratio for Helvetica-Bold
pub const HELVETICA_BOLD_CHAR_WIDTH_RATIO: f32 = 0.55;

/// Label used in the header when the order has no number
pub const UNKNOWN_ORDER_NUMBER: &str = "UNKNOWN";

/// Separator between product info fields
pub const PRODUCT_INFO_SEPARATOR: &str = " | ";

// =============================================================================
// Placeholder Artwork
// =============================================================================

pub const PLACEHOLDER_WIDTH_PX: u32 = 400;
pub const PLACEHOLDER_HEIGHT_PX: u32 = 300;

/// Light gray fill
pub const PLACEHOLDER_FILL_RGB: [u8; 3] = [192, 192, 192];

/// Dark gray one-pixel border
pub const PLACEHOLDER_BORDER_RGB: [u8; 3] = [64, 64, 64];

// =============================================================================
// Identifier Code
// =============================================================================

/// Raster size used when a non-positive pixel size is requested
pub const DEFAULT_QR_SIZE_PX: u32 = 100;

/// Largest identifier raster the config may ask for
pub const MAX_QR_SIZE_PX: u32 = 4096;

/// Filename stem used when the order has no number
pub const DEFAULT_FILENAME_STEM: &str = "ORDER";
