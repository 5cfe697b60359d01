//! JSON wall documents.
//!
//! Two shapes are emitted. The full document carries everything a CAD
//! consumer may want per wall (`id`, `points`, `length`, `angle`) plus
//! document metadata. The minimal document is the persisted-record
//! contract: per wall only `id` and `points`, with the source name in
//! the metadata.
//!
//! Both are plain `serde` structs serialized with 2-space indentation;
//! no timestamps or other non-deterministic fields, so identical
//! detection results produce byte-identical documents.

use serde::{Deserialize, Serialize};

use wallform_pipeline::{DetectResult, Wall};

/// Errors that can occur while serializing export documents.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// JSON serialization failed.
    #[error("failed to serialize document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Metadata block of the full wall document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Source image name (no path components).
    pub source: String,
    /// Working-resolution width the wall coordinates refer to.
    pub image_width: u32,
    /// Working-resolution height the wall coordinates refer to.
    pub image_height: u32,
    /// Number of walls in the document.
    pub total_walls: usize,
}

/// One wall in the full document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedWall {
    /// Wall identifier (`"w1"`, `"w2"`, ...).
    pub id: String,
    /// Endpoints as `[[x0, y0], [x1, y1]]`.
    pub points: [[i32; 2]; 2],
    /// Euclidean length in pixels.
    pub length: f64,
    /// Orientation in degrees, in `[0, 180)`.
    pub angle: f64,
}

impl From<&Wall> for ExportedWall {
    fn from(wall: &Wall) -> Self {
        Self {
            id: wall.id.clone(),
            points: [[wall.start.x, wall.start.y], [wall.end.x, wall.end.y]],
            length: wall.length,
            angle: wall.angle,
        }
    }
}

/// Full wall document: metadata plus per-wall geometry and derived values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallDocument {
    /// Document metadata.
    pub meta: DocumentMeta,
    /// Walls in detection order.
    pub walls: Vec<ExportedWall>,
}

/// Metadata block of the minimal document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimalMeta {
    /// Source image name (no path components).
    pub source: String,
}

/// One wall in the minimal document: identifier and endpoints only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimalWall {
    /// Wall identifier.
    pub id: String,
    /// Endpoints as `[[x0, y0], [x1, y1]]`.
    pub points: [[i32; 2]; 2],
}

/// Minimal wall document for persisted records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimalWallDocument {
    /// Document metadata.
    pub meta: MinimalMeta,
    /// Walls in detection order.
    pub walls: Vec<MinimalWall>,
}

/// Build the full wall document for a detection result.
#[must_use]
pub fn wall_document(source: &str, result: &DetectResult) -> WallDocument {
    WallDocument {
        meta: DocumentMeta {
            source: source.to_owned(),
            image_width: result.dimensions.width,
            image_height: result.dimensions.height,
            total_walls: result.walls.len(),
        },
        walls: result.walls.iter().map(ExportedWall::from).collect(),
    }
}

/// Build the minimal wall document for a detection result.
#[must_use]
pub fn minimal_document(source: &str, result: &DetectResult) -> MinimalWallDocument {
    MinimalWallDocument {
        meta: MinimalMeta {
            source: source.to_owned(),
        },
        walls: result
            .walls
            .iter()
            .map(|wall| MinimalWall {
                id: wall.id.clone(),
                points: [[wall.start.x, wall.start.y], [wall.end.x, wall.end.y]],
            })
            .collect(),
    }
}

/// Serialize a document with 2-space indentation and a trailing newline.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if serialization fails (only possible
/// for non-string map keys or failing `Serialize` impls, neither of
/// which the document types contain; callers still handle the error
/// rather than unwrapping).
pub fn to_json<T: Serialize>(document: &T) -> Result<String, ExportError> {
    let mut out = serde_json::to_string_pretty(document)?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wallform_pipeline::{Dimensions, Point, RawSegment};

    fn sample_result() -> DetectResult {
        let walls = vec![
            Wall::from_segment(
                RawSegment::new(Point::new(10, 51), Point::new(120, 51)),
                1,
            ),
            Wall::from_segment(
                RawSegment::new(Point::new(120, 51), Point::new(120, 200)),
                2,
            ),
        ];
        DetectResult {
            walls,
            dimensions: Dimensions {
                width: 640,
                height: 480,
            },
        }
    }

    #[test]
    fn full_document_carries_meta_and_derived_fields() {
        let doc = wall_document("plan.png", &sample_result());
        assert_eq!(doc.meta.source, "plan.png");
        assert_eq!(doc.meta.image_width, 640);
        assert_eq!(doc.meta.image_height, 480);
        assert_eq!(doc.meta.total_walls, 2);

        assert_eq!(doc.walls[0].id, "w1");
        assert_eq!(doc.walls[0].points, [[10, 51], [120, 51]]);
        assert!((doc.walls[0].length - 110.0).abs() < f64::EPSILON);
        assert!(doc.walls[0].angle.abs() < f64::EPSILON);
    }

    #[test]
    fn minimal_document_strips_derived_fields() {
        let doc = minimal_document("plan.png", &sample_result());
        assert_eq!(doc.meta.source, "plan.png");
        assert_eq!(doc.walls.len(), 2);
        assert_eq!(doc.walls[1].id, "w2");
        assert_eq!(doc.walls[1].points, [[120, 51], [120, 200]]);

        // The serialized form must not leak length or angle.
        let json = to_json(&doc).unwrap();
        assert!(!json.contains("length"));
        assert!(!json.contains("angle"));
    }

    #[test]
    fn json_round_trips() {
        let doc = wall_document("plan.png", &sample_result());
        let json = to_json(&doc).unwrap();
        let back: WallDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn json_is_deterministic() {
        let result = sample_result();
        let a = to_json(&wall_document("plan.png", &result)).unwrap();
        let b = to_json(&wall_document("plan.png", &result)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_result_produces_empty_wall_list() {
        let result = DetectResult {
            walls: vec![],
            dimensions: Dimensions {
                width: 100,
                height: 100,
            },
        };
        let doc = wall_document("empty.png", &result);
        assert_eq!(doc.meta.total_walls, 0);
        assert!(doc.walls.is_empty());
        let json = to_json(&doc).unwrap();
        assert!(json.contains("\"walls\": []"));
    }
}
