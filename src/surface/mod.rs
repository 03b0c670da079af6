//! Abstract 2D raster surface the renderer draws on.

mod raster;

pub use raster::RasterSurface;

use crate::error::Result;
use crate::export::ImageFormat;
use crate::model::{ClientRect, Color, Point, Size};

/// Drawing primitives in logical units. Implementations apply the device pixel ratio.
pub trait Surface {
    /// Logical size of the drawable area.
    fn size(&self) -> Size;

    /// Screen-space position of the surface, used to map client coordinates.
    fn bounding_rect(&self) -> ClientRect;

    /// Re-establishes the logical-to-physical pixel ratio. Wipes content and styles.
    fn resize(&mut self, size: Size, pixel_ratio: f64);

    fn set_paint(&mut self, color: &Color);

    fn set_line_width(&mut self, width: f64);

    fn fill_disk(&mut self, center: Point, radius: f64);

    fn begin_path(&mut self);

    fn move_to(&mut self, point: Point);

    /// Extends the open path to `point` and strokes it.
    fn stroke_line_to(&mut self, point: Point);

    /// Erases everything to transparent.
    fn clear_region(&mut self);

    /// Paints `color` over the whole surface.
    fn fill_background(&mut self, color: &Color);

    fn export_image(&self, format: ImageFormat) -> Result<Vec<u8>>;
}
