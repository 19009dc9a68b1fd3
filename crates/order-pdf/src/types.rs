use crate::constants::{PRODUCT_INFO_SEPARATOR, UNKNOWN_ORDER_NUMBER};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderPdfError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Generation cancelled")]
    Cancelled,
    #[error("Render error: {0}")]
    Render(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to write")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, OrderPdfError>;

/// A fully resolved order, pre-fetched by the caller.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct OrderDocumentRequest {
    /// Opaque order identifier, encoded into the QR code. Empty means no code.
    pub id: String,
    /// Human readable order label
    pub order_number: Option<String>,
    /// Owner of the artwork files, handed to the artwork loader
    pub owner_id: i64,
    pub items: Vec<LineItem>,
}

impl OrderDocumentRequest {
    /// Sum of all positive quantities, floored at one page.
    pub fn total_page_count(&self) -> usize {
        let total: usize = self.items.iter().map(LineItem::page_count).sum();
        total.max(1)
    }

    /// Order number shown in the header, or the documented placeholder
    pub fn display_order_number(&self) -> &str {
        match self.order_number.as_deref() {
            Some(number) if !number.is_empty() => number,
            _ => UNKNOWN_ORDER_NUMBER,
        }
    }
}

/// One article/variant/quantity entry of an order
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct LineItem {
    pub quantity: i32,
    /// Raw artwork bytes; take precedence over `artwork_filename`
    pub inline_artwork_bytes: Option<Vec<u8>>,
    pub artwork_filename: Option<String>,
    pub product_info: Option<ProductInfo>,
    pub print_template: Option<PrintGeometry>,
}

impl LineItem {
    /// Number of physical pages this item contributes
    pub fn page_count(&self) -> usize {
        usize::try_from(self.quantity).unwrap_or(0)
    }

    /// Display line built from the non-empty product info fields
    pub fn product_info_line(&self) -> Option<String> {
        let info = self.product_info.as_ref()?;
        let fields: Vec<&str> = [
            info.supplier_name.as_deref(),
            info.supplier_number.as_deref(),
            info.variant_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|field| !field.is_empty())
        .collect();

        if fields.is_empty() {
            None
        } else {
            Some(fields.join(PRODUCT_INFO_SEPARATOR))
        }
    }
}

/// Display fields for the product info line
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct ProductInfo {
    pub supplier_name: Option<String>,
    pub supplier_number: Option<String>,
    pub variant_name: Option<String>,
}

/// Physical print dimensions of a product, in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct PrintGeometry {
    pub page_width_mm: Option<f32>,
    pub page_height_mm: Option<f32>,
    pub artwork_width_mm: Option<f32>,
    pub artwork_height_mm: Option<f32>,
    pub margin_bottom_mm: Option<f32>,
}

/// Statistics about an order document, computed without rendering
#[derive(Debug, Clone, PartialEq)]
pub struct OrderStatistics {
    /// Number of line items in the request
    pub line_items: usize,
    /// Line items with a quantity of zero or less
    pub skipped_items: usize,
    /// Pages the document will contain
    pub total_pages: usize,
    /// Times the page size changes from one page to the next
    pub page_size_changes: usize,
    /// Distinct page sizes in points, in order of first use
    pub page_sizes_pt: Vec<(f32, f32)>,
}
