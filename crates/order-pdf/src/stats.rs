use crate::layout::{PageGeometry, plan_geometry, plan_page};
use crate::options::OrderPdfConfig;
use crate::types::*;

/// Calculate statistics for an order without rendering it
///
/// Works per line item, so the cost does not grow with quantities.
pub fn calculate_statistics(
    request: &OrderDocumentRequest,
    config: &OrderPdfConfig,
) -> OrderStatistics {
    let mut skipped_items = 0;
    let mut page_size_changes = 0;
    let mut previous: Option<PageGeometry> = None;
    let mut distinct: Vec<PageGeometry> = Vec::new();

    for item in &request.items {
        if item.page_count() == 0 {
            skipped_items += 1;
            continue;
        }

        // All units of an item share its geometry; only item boundaries can change size
        let geometry = plan_page(item, config);
        if previous.is_some_and(|prev| !prev.same_size(&geometry)) {
            page_size_changes += 1;
        }
        if !distinct.iter().any(|seen| seen.same_size(&geometry)) {
            distinct.push(geometry);
        }
        previous = Some(geometry);
    }

    // An empty order still prints one default page
    if distinct.is_empty() {
        distinct.push(plan_geometry(None, config));
    }

    OrderStatistics {
        line_items: request.items.len(),
        skipped_items,
        total_pages: request.total_page_count(),
        page_size_changes,
        page_sizes_pt: distinct
            .iter()
            .map(|page| (page.page_width, page.page_height))
            .collect(),
    }
}
