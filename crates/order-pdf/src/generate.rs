//! Order document generation
//!
//! The generator expands line items by quantity into physical pages, plans
//! each page, and renders it onto a [`DocumentSurface`]. [`generate`] does
//! this onto the lopdf writer and returns the finished bytes.
//!
//! [`generate`]: OrderPdfGenerator::generate

use crate::artwork::{ArtworkLoader, ArtworkResolver, ArtworkSource, NoArtworkLoader};
use crate::cancel::CancellationToken;
use crate::constants::DEFAULT_FILENAME_STEM;
use crate::layout::{PageGeometry, plan_page};
use crate::options::OrderPdfConfig;
use crate::qr::{IdentifierEncoder, QrEncoder};
use crate::render::{DocumentSurface, PageContext, PdfWriter, render_page};
use crate::types::*;
use std::path::Path;
use std::sync::Arc;

/// Produces print-ready order documents.
///
/// Holds only read-only state, so one generator can serve concurrent calls.
pub struct OrderPdfGenerator {
    config: OrderPdfConfig,
    loader: Arc<dyn ArtworkLoader>,
    encoder: Arc<dyn IdentifierEncoder>,
}

impl OrderPdfGenerator {
    /// Create a generator with no artwork storage and the QR encoder.
    pub fn new(config: OrderPdfConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            loader: Arc::new(NoArtworkLoader),
            encoder: Arc::new(QrEncoder),
        })
    }

    pub fn with_loader(mut self, loader: Arc<dyn ArtworkLoader>) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_encoder(mut self, encoder: Arc<dyn IdentifierEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn config(&self) -> &OrderPdfConfig {
        &self.config
    }

    /// Render the whole order and serialize it.
    pub fn generate(
        &self,
        request: &OrderDocumentRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>> {
        let mut writer = PdfWriter::new();
        writer.set_title(request.display_order_number());
        self.render_into(request, &mut writer, cancel)?;
        writer.serialize()
    }

    /// Render every page of the order onto `surface`.
    ///
    /// Returns the number of pages drawn.
    pub fn render_into(
        &self,
        request: &OrderDocumentRequest,
        surface: &mut dyn DocumentSurface,
        cancel: &CancellationToken,
    ) -> Result<usize> {
        let resolver = ArtworkResolver::new(self.loader.as_ref());
        let mut assembler = Assembler::new(self, request, &resolver, surface);

        for item in &request.items {
            if item.page_count() == 0 {
                log::debug!("Skipping line item with quantity {}", item.quantity);
                continue;
            }
            for _ in 0..item.page_count() {
                if cancel.is_cancelled() {
                    log::info!(
                        "Generation of order {} cancelled after {} pages",
                        request.display_order_number(),
                        assembler.pages_drawn
                    );
                    return Err(OrderPdfError::Cancelled);
                }
                assembler.add_page(item)?;
            }
        }

        if assembler.state == AssemblyState::Idle {
            if cancel.is_cancelled() {
                return Err(OrderPdfError::Cancelled);
            }
            log::debug!("Order has no printable items, drawing a default page");
            assembler.add_page(&LineItem::default())?;
        }

        assembler.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssemblyState {
    Idle,
    Assembling,
    Finalized,
}

/// Tracks page numbering and page size across one generation call
struct Assembler<'a> {
    state: AssemblyState,
    generator: &'a OrderPdfGenerator,
    request: &'a OrderDocumentRequest,
    resolver: &'a ArtworkResolver<'a>,
    surface: &'a mut dyn DocumentSurface,
    total_pages: usize,
    pages_drawn: usize,
    placeholders: usize,
    current: Option<PageGeometry>,
}

impl<'a> Assembler<'a> {
    fn new(
        generator: &'a OrderPdfGenerator,
        request: &'a OrderDocumentRequest,
        resolver: &'a ArtworkResolver<'a>,
        surface: &'a mut dyn DocumentSurface,
    ) -> Self {
        let total_pages = request.total_page_count();
        log::info!(
            "Generating order {} with {} pages",
            request.display_order_number(),
            total_pages
        );

        Self {
            state: AssemblyState::Idle,
            generator,
            request,
            resolver,
            surface,
            total_pages,
            pages_drawn: 0,
            placeholders: 0,
            current: None,
        }
    }

    fn add_page(&mut self, item: &LineItem) -> Result<()> {
        debug_assert_ne!(self.state, AssemblyState::Finalized);
        self.state = AssemblyState::Assembling;

        let geometry = plan_page(item, &self.generator.config);
        if let Some(previous) = &self.current {
            if !previous.same_size(&geometry) {
                log::debug!(
                    "Page size changes to {:.1}x{:.1}pt at page {}",
                    geometry.page_width,
                    geometry.page_height,
                    self.pages_drawn + 1
                );
            }
        }

        // One physical page per unit
        self.surface
            .begin_page(geometry.page_width, geometry.page_height)?;

        let ctx = PageContext {
            request: self.request,
            item,
            geometry,
            page_number: self.pages_drawn + 1,
            total_pages: self.total_pages,
            config: &self.generator.config,
            resolver: self.resolver,
            encoder: self.generator.encoder.as_ref(),
        };
        let source = render_page(&mut *self.surface, &ctx)?;
        if source == ArtworkSource::Placeholder {
            self.placeholders += 1;
        }
        log::debug!(
            "Page {}/{}: {:.1}x{:.1}pt, artwork {:?}",
            ctx.page_number,
            self.total_pages,
            geometry.page_width,
            geometry.page_height,
            source
        );

        self.current = Some(geometry);
        self.pages_drawn += 1;
        Ok(())
    }

    fn finish(mut self) -> Result<usize> {
        self.state = AssemblyState::Finalized;
        if self.placeholders > 0 {
            log::warn!(
                "Order {} uses placeholder artwork on {} of {} pages",
                self.request.display_order_number(),
                self.placeholders,
                self.pages_drawn
            );
        }
        log::info!(
            "Order {} assembled: {} pages",
            self.request.display_order_number(),
            self.pages_drawn
        );
        Ok(self.pages_drawn)
    }
}

/// Generate an order document on the blocking thread pool.
pub async fn generate_order_pdf(
    generator: Arc<OrderPdfGenerator>,
    request: OrderDocumentRequest,
    cancel: CancellationToken,
) -> Result<Vec<u8>> {
    let bytes =
        tokio::task::spawn_blocking(move || generator.generate(&request, &cancel)).await??;
    Ok(bytes)
}

/// Write a generated document to disk
pub async fn save_pdf(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

/// Download filename for an order document
pub fn pdf_filename(order_number: Option<&str>) -> String {
    match order_number {
        Some(number) if !number.is_empty() => format!("{}.pdf", number),
        _ => format!("{}.pdf", DEFAULT_FILENAME_STEM),
    }
}
