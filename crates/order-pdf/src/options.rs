use crate::constants::{MAX_PAGE_SIDE_PT, MAX_QR_SIZE_PX, mm_to_pt};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Process-wide generation settings, fixed at construction
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct OrderPdfConfig {
    // Default page
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,

    /// Vertical space kept free for the header when the artwork box is derived
    pub header_band_mm: f32,

    // Text
    pub font_size_pt: f32,

    // Identifier code
    pub qr_size_pt: f32,
    pub qr_size_px: u32,
}

impl Default for OrderPdfConfig {
    fn default() -> Self {
        Self {
            page_width_mm: 239.0,
            page_height_mm: 99.0,
            margin_mm: 1.0,
            header_band_mm: 15.0,
            font_size_pt: 14.0,
            qr_size_pt: 40.0,
            qr_size_px: 100,
        }
    }
}

impl OrderPdfConfig {
    /// Load config from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| OrderPdfError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| OrderPdfError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        let dimensions = [
            ("page width", self.page_width_mm),
            ("page height", self.page_height_mm),
            ("margin", self.margin_mm),
            ("header band", self.header_band_mm),
            ("font size", self.font_size_pt),
            ("QR code size", self.qr_size_pt),
        ];
        for (name, value) in dimensions {
            if !value.is_finite() {
                return Err(OrderPdfError::Config(format!("{} must be finite", name)));
            }
        }

        if self.page_width_mm <= 0.0 || self.page_height_mm <= 0.0 {
            return Err(OrderPdfError::Config(format!(
                "Page size must be positive, got {}x{} mm",
                self.page_width_mm, self.page_height_mm
            )));
        }

        if mm_to_pt(self.page_width_mm.max(self.page_height_mm)) > MAX_PAGE_SIDE_PT {
            return Err(OrderPdfError::Config(format!(
                "Page size {}x{} mm exceeds the {} pt PDF limit",
                self.page_width_mm, self.page_height_mm, MAX_PAGE_SIDE_PT
            )));
        }

        if self.margin_mm < 0.0 {
            return Err(OrderPdfError::Config(
                "Margin must not be negative".to_string(),
            ));
        }

        if 2.0 * self.margin_mm >= self.page_width_mm.min(self.page_height_mm) {
            return Err(OrderPdfError::Config(format!(
                "Margin of {} mm leaves no printable area on a {}x{} mm page",
                self.margin_mm, self.page_width_mm, self.page_height_mm
            )));
        }

        if self.header_band_mm < 0.0 {
            return Err(OrderPdfError::Config(
                "Header band must not be negative".to_string(),
            ));
        }

        if self.font_size_pt <= 0.0 {
            return Err(OrderPdfError::Config(
                "Font size must be positive".to_string(),
            ));
        }

        if self.qr_size_pt <= 0.0 {
            return Err(OrderPdfError::Config(
                "QR code size must be positive".to_string(),
            ));
        }

        if self.qr_size_px > MAX_QR_SIZE_PX {
            return Err(OrderPdfError::Config(format!(
                "QR raster of {} px exceeds the {} px limit",
                self.qr_size_px, MAX_QR_SIZE_PX
            )));
        }

        Ok(())
    }
}
