use order_pdf::constants::{POINTS_PER_MM, mm_to_pt, pt_to_mm};
use order_pdf::layout::{Rect, fit_image, plan_geometry, plan_page};
use order_pdf::*;

#[test]
fn test_mm_conversion() {
    assert!((mm_to_pt(100.0) - 283.46).abs() < 0.01);
    assert!((mm_to_pt(25.4) - 72.0).abs() < 0.001);
    assert!((pt_to_mm(72.0) - 25.4).abs() < 0.001);
    assert_eq!(mm_to_pt(0.0), 0.0);
}

#[test]
fn test_default_geometry() {
    let config = OrderPdfConfig::default();
    let geometry = plan_geometry(None, &config);

    assert!((geometry.page_width - 239.0 * POINTS_PER_MM).abs() < 0.01);
    assert!((geometry.page_height - 99.0 * POINTS_PER_MM).abs() < 0.01);
    assert!((geometry.margin - POINTS_PER_MM).abs() < 0.01);

    // Usable area minus the header band
    assert!((geometry.artwork_width - 237.0 * POINTS_PER_MM).abs() < 0.01);
    assert!((geometry.artwork_height - 82.0 * POINTS_PER_MM).abs() < 0.01);

    let artwork = geometry.artwork_box();
    assert!((artwork.center_x() - geometry.page_width / 2.0).abs() < 0.01);
    assert!((artwork.center_y() - geometry.page_height / 2.0).abs() < 0.01);
}

#[test]
fn test_template_geometry() {
    let config = OrderPdfConfig::default();
    let item = LineItem {
        quantity: 1,
        print_template: Some(PrintGeometry {
            page_width_mm: Some(200.0),
            page_height_mm: Some(100.0),
            artwork_width_mm: Some(180.0),
            artwork_height_mm: Some(80.0),
            margin_bottom_mm: Some(3.0),
        }),
        ..Default::default()
    };
    let geometry = plan_page(&item, &config);

    assert!((geometry.page_width - mm_to_pt(200.0)).abs() < 0.01);
    assert!((geometry.page_height - mm_to_pt(100.0)).abs() < 0.01);
    assert!((geometry.margin - mm_to_pt(3.0)).abs() < 0.01);
    assert!((geometry.artwork_width - mm_to_pt(180.0)).abs() < 0.01);
    assert!((geometry.artwork_height - mm_to_pt(80.0)).abs() < 0.01);
}

#[test]
fn test_unusable_template_values_fall_back() {
    let config = OrderPdfConfig::default();
    let defaults = plan_geometry(None, &config);

    for template in [
        PrintGeometry {
            page_width_mm: Some(f32::NAN),
            page_height_mm: Some(50.0),
            margin_bottom_mm: Some(-2.0),
            ..Default::default()
        },
        PrintGeometry {
            page_height_mm: Some(50.0),
            artwork_width_mm: Some(0.0),
            artwork_height_mm: Some(40.0),
            ..Default::default()
        },
    ] {
        let geometry = plan_geometry(Some(&template), &config);
        assert_eq!(geometry, defaults);
    }
}

#[test]
fn test_default_margin_too_large_for_template_page() {
    let config = OrderPdfConfig {
        margin_mm: 10.0,
        ..Default::default()
    };
    let template = PrintGeometry {
        page_width_mm: Some(15.0),
        page_height_mm: Some(15.0),
        ..Default::default()
    };
    let geometry = plan_geometry(Some(&template), &config);

    assert_eq!(geometry.margin, 0.0);
    assert!(geometry.artwork_width > 0.0);
    assert!(geometry.artwork_height > 0.0);
}

#[test]
fn test_fit_preserves_aspect_ratio() {
    let bounds = Rect::new(10.0, 20.0, 300.0, 100.0);

    for (w, h) in [(400, 300), (1000, 10), (10, 1000), (1, 1)] {
        let placement = fit_image(&bounds, w, h);
        let rect = placement.rect;
        let expected = w as f32 / h as f32;

        assert!((rect.width / rect.height - expected).abs() / expected < 0.001);
        assert!(rect.width <= bounds.width + 0.001);
        assert!(rect.height <= bounds.height + 0.001);
        assert!((rect.center_x() - bounds.center_x()).abs() < 0.001);
        assert!((rect.center_y() - bounds.center_y()).abs() < 0.001);
    }
}

#[test]
fn test_fit_upscales_small_images() {
    let bounds = Rect::new(0.0, 0.0, 200.0, 100.0);
    let placement = fit_image(&bounds, 20, 10);
    assert!((placement.scale - 10.0).abs() < 0.001);
    assert_eq!(placement.rect, bounds);
}
