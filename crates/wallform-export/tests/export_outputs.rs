//! Integration test: one detection result through every export surface.

#![allow(clippy::unwrap_used)]

use wallform_pipeline::{DetectResult, Dimensions, Point, RawSegment, Wall};

fn l_shaped_result() -> DetectResult {
    DetectResult {
        walls: vec![
            Wall::from_segment(RawSegment::new(Point::new(20, 23), Point::new(480, 23)), 1),
            Wall::from_segment(RawSegment::new(Point::new(477, 20), Point::new(477, 380)), 2),
        ],
        dimensions: Dimensions {
            width: 500,
            height: 400,
        },
    }
}

#[test]
fn json_svg_and_overlay_agree_on_walls() {
    let result = l_shaped_result();

    let full = wallform_export::to_json(&wallform_export::wall_document("plan.png", &result)).unwrap();
    let minimal =
        wallform_export::to_json(&wallform_export::minimal_document("plan.png", &result)).unwrap();
    let svg = wallform_export::to_svg(&result.walls, result.dimensions);

    for id in ["w1", "w2"] {
        assert!(full.contains(id), "full JSON must mention {id}");
        assert!(minimal.contains(id), "minimal JSON must mention {id}");
        assert!(svg.contains(id), "SVG must mention {id}");
    }
    assert!(full.contains("\"total_walls\": 2"));
    assert!(minimal.contains("\"source\": \"plan.png\""));
    assert!(svg.contains("viewBox=\"0 0 500 400\""));

    let background =
        image::RgbaImage::from_pixel(500, 400, image::Rgba([255, 255, 255, 255]));
    let overlay = wallform_export::draw_walls(&background, &result.walls);
    // A pixel in the middle of the horizontal wall must be painted.
    assert_eq!(*overlay.get_pixel(250, 23), image::Rgba([0, 255, 0, 255]));
    // A pixel far from any wall must be untouched.
    assert_eq!(*overlay.get_pixel(250, 200), image::Rgba([255, 255, 255, 255]));
}
