//! SVG export serializer.
//!
//! Converts identified walls into an SVG document with one `<line>`
//! element per wall, using the [`svg`] crate for document construction
//! and XML escaping. Each line carries its wall id both as a `<title>`
//! child (hover tooltip in browsers) and an `id` attribute (stable
//! anchor for downstream tooling).
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::{Line, Title};

use wallform_pipeline::{Dimensions, Wall};

/// Stroke color for wall lines.
const WALL_STROKE: &str = "#33cc33";
/// Stroke width in pixels of the coordinate space.
const WALL_STROKE_WIDTH: u32 = 2;

/// Render walls as an SVG document.
///
/// The `viewBox` matches the working-resolution dimensions, so the SVG
/// overlays pixel-exactly on the resized source image.
#[must_use]
pub fn to_svg(walls: &[Wall], dimensions: Dimensions) -> String {
    let mut doc = Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set(
            "viewBox",
            (0u32, 0u32, dimensions.width, dimensions.height),
        )
        .set("width", dimensions.width)
        .set("height", dimensions.height);

    for wall in walls {
        let line = Line::new()
            .set("id", wall.id.as_str())
            .set("x1", wall.start.x)
            .set("y1", wall.start.y)
            .set("x2", wall.end.x)
            .set("y2", wall.end.y)
            .set("stroke", WALL_STROKE)
            .set("stroke-width", WALL_STROKE_WIDTH)
            .add(Title::new(wall.id.as_str()));
        doc = doc.add(line);
    }

    doc.to_string()
}
