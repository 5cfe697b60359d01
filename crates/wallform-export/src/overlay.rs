//! Raster overlay rendering.
//!
//! Draws the identified walls onto the working-resolution source image
//! so a reviewer can eyeball the detection against the original plan.
//! Pure: takes an image, returns a new image; encoding and writing are
//! the caller's job.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;

use wallform_pipeline::Wall;

/// Overlay stroke color (opaque green).
const WALL_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);

/// Draw walls onto a copy of the given image.
///
/// Each wall is drawn as a 3px stroke: the wall line plus one offset
/// line on either side along the wall's normal.
#[must_use = "returns the annotated image"]
pub fn draw_walls(image: &RgbaImage, walls: &[Wall]) -> RgbaImage {
    let mut out = image.clone();

    for wall in walls {
        let (nx, ny) = normal_offset(wall.angle);
        for step in -1i32..=1 {
            let dx = f64::from(step * nx);
            let dy = f64::from(step * ny);
            #[allow(clippy::cast_possible_truncation)]
            draw_line_segment_mut(
                &mut out,
                (
                    (f64::from(wall.start.x) + dx) as f32,
                    (f64::from(wall.start.y) + dy) as f32,
                ),
                (
                    (f64::from(wall.end.x) + dx) as f32,
                    (f64::from(wall.end.y) + dy) as f32,
                ),
                WALL_COLOR,
            );
        }
    }
    out
}

/// Unit-ish pixel offset perpendicular to a wall at `angle` degrees.
fn normal_offset(angle: f64) -> (i32, i32) {
    let (sin, cos) = angle.to_radians().sin_cos();
    #[allow(clippy::cast_possible_truncation)]
    ((-sin).round() as i32, cos.round() as i32)
}
