//! wallform-export: Pure serializers and overlay rendering (sans-IO)
//!
//! Converts identified walls into output formats: full and minimal
//! JSON documents, an SVG drawing, and a raster overlay on the source
//! plan. Every function returns in-memory data; writing files is the
//! CLI's job.

pub mod json;
pub mod overlay;
pub mod svg;

pub use json::{ExportError, minimal_document, to_json, wall_document};
pub use overlay::draw_walls;
pub use svg::to_svg;
