use order_pdf::constants::mm_to_pt;
use order_pdf::*;

fn item(quantity: i32, size_mm: Option<(f32, f32)>) -> LineItem {
    LineItem {
        quantity,
        print_template: size_mm.map(|(w, h)| PrintGeometry {
            page_width_mm: Some(w),
            page_height_mm: Some(h),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[test]
fn test_statistics_simple_order() {
    let request = OrderDocumentRequest {
        items: vec![item(3, None), item(0, None)],
        ..Default::default()
    };
    let stats = calculate_statistics(&request, &OrderPdfConfig::default());

    assert_eq!(stats.line_items, 2);
    assert_eq!(stats.skipped_items, 1);
    assert_eq!(stats.total_pages, 3);
    assert_eq!(stats.page_size_changes, 0);
    assert_eq!(stats.page_sizes_pt.len(), 1);
    assert!((stats.page_sizes_pt[0].0 - mm_to_pt(239.0)).abs() < 0.01);
}

#[test]
fn test_statistics_mixed_sizes() {
    let request = OrderDocumentRequest {
        items: vec![
            item(2, None),
            item(1, Some((100.0, 50.0))),
            item(-4, Some((10.0, 10.0))),
            item(1, None),
        ],
        ..Default::default()
    };
    let stats = calculate_statistics(&request, &OrderPdfConfig::default());

    assert_eq!(stats.total_pages, 4);
    assert_eq!(stats.skipped_items, 1);
    // default -> 100x50 -> default
    assert_eq!(stats.page_size_changes, 2);
    assert_eq!(stats.page_sizes_pt.len(), 2);
    assert!((stats.page_sizes_pt[1].0 - mm_to_pt(100.0)).abs() < 0.01);
    assert!((stats.page_sizes_pt[1].1 - mm_to_pt(50.0)).abs() < 0.01);
}

#[test]
fn test_statistics_empty_order() {
    let stats = calculate_statistics(&OrderDocumentRequest::default(), &OrderPdfConfig::default());
    assert_eq!(stats.line_items, 0);
    assert_eq!(stats.total_pages, 1);
    assert_eq!(stats.page_sizes_pt.len(), 1);
}

#[test]
fn test_statistics_match_generated_pages() {
    let request = OrderDocumentRequest {
        id: "x".to_string(),
        items: vec![item(2, Some((120.0, 60.0))), item(1, None)],
        ..Default::default()
    };
    let config = OrderPdfConfig::default();
    let stats = calculate_statistics(&request, &config);

    let bytes = OrderPdfGenerator::new(config)
        .unwrap()
        .generate(&request, &CancellationToken::new())
        .unwrap();
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), stats.total_pages);
}

#[test]
fn test_statistics_huge_quantity() {
    let request = OrderDocumentRequest {
        items: vec![
            item(i32::MAX, None),
            item(i32::MAX, Some((100.0, 50.0))),
            item(1, None),
        ],
        ..Default::default()
    };
    let stats = calculate_statistics(&request, &OrderPdfConfig::default());

    assert_eq!(stats.total_pages, 2 * i32::MAX as usize + 1);
    assert_eq!(stats.page_size_changes, 2);
    assert_eq!(stats.page_sizes_pt.len(), 2);
}

#[test]
fn test_statistics_skipped_items_do_not_break_runs() {
    let request = OrderDocumentRequest {
        items: vec![
            item(1, Some((100.0, 50.0))),
            item(0, None),
            item(2, Some((100.0, 50.0))),
        ],
        ..Default::default()
    };
    let stats = calculate_statistics(&request, &OrderPdfConfig::default());

    assert_eq!(stats.total_pages, 3);
    assert_eq!(stats.page_size_changes, 0);
    assert_eq!(stats.page_sizes_pt.len(), 1);
}
