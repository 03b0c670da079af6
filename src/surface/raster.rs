use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};

use super::Surface;
use crate::error::Result;
use crate::export::ImageFormat;
use crate::model::{ClientRect, Color, Point, Size};

const JPEG_QUALITY: u8 = 92;

/// Software RGBA surface. Shapes are hard-edged: a pixel is painted when its centre
/// lies inside the shape. Line segments get round caps.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
    size: Size,
    pixel_ratio: f64,
    origin: (f64, f64),
    paint: [u8; 4],
    line_width: f64,
    cursor: Option<Point>,
}

impl RasterSurface {
    pub fn new(size: Size) -> Self {
        Self::with_pixel_ratio(size, 1.0)
    }

    pub fn with_pixel_ratio(size: Size, pixel_ratio: f64) -> Self {
        let mut surface = Self {
            pixels: RgbaImage::new(0, 0),
            size,
            pixel_ratio: 1.0,
            origin: (0.0, 0.0),
            paint: [0, 0, 0, 255],
            line_width: 1.0,
            cursor: None,
        };
        surface.resize(size, pixel_ratio);
        surface
    }

    /// Places the surface at `(left, top)` in client coordinates.
    pub fn with_origin(mut self, left: f64, top: f64) -> Self {
        self.origin = (left, top);
        self
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Pixel at a logical coordinate, if inside the surface.
    pub fn pixel_at(&self, point: Point) -> Option<[u8; 4]> {
        let x = (point.x * self.pixel_ratio).floor();
        let y = (point.y * self.pixel_ratio).floor();
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return None;
        }
        Some(self.pixels.get_pixel(x, y).0)
    }

    /// Paints every pixel whose centre satisfies `inside` within the physical bounds given.
    fn paint_where(&mut self, min: Point, max: Point, inside: impl Fn(f64, f64) -> bool) {
        let (w, h) = (self.pixels.width() as f64, self.pixels.height() as f64);
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = max.x.ceil().min(w).max(0.0) as u32;
        let y1 = max.y.ceil().min(h).max(0.0) as u32;
        let paint = self.paint;
        for y in y0..y1 {
            for x in x0..x1 {
                if inside(x as f64 + 0.5, y as f64 + 0.5) {
                    blend(self.pixels.get_pixel_mut(x, y), paint);
                }
            }
        }
    }

    fn physical(&self, point: Point) -> Point {
        Point::new(point.x * self.pixel_ratio, point.y * self.pixel_ratio)
    }
}

/// Source-over compositing of `src` onto `dst`.
fn blend(dst: &mut Rgba<u8>, src: [u8; 4]) {
    let sa = src[3] as f64 / 255.0;
    if sa <= 0.0 {
        return;
    }
    let da = dst.0[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for i in 0..3 {
        let s = src[i] as f64 / 255.0;
        let d = dst.0[i] as f64 / 255.0;
        let c = (s * sa + d * da * (1.0 - sa)) / out_a;
        dst.0[i] = (c * 255.0).round() as u8;
    }
    dst.0[3] = (out_a * 255.0).round() as u8;
}

fn distance_to_segment(px: f64, py: f64, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - a.x) * dx + (py - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    (px - (a.x + t * dx)).hypot(py - (a.y + t * dy))
}

impl Surface for RasterSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn bounding_rect(&self) -> ClientRect {
        ClientRect {
            left: self.origin.0,
            top: self.origin.1,
            width: self.size.width,
            height: self.size.height,
        }
    }

    fn resize(&mut self, size: Size, pixel_ratio: f64) {
        let pixel_ratio = pixel_ratio.max(1.0);
        let width = (size.width.max(0.0) * pixel_ratio).round() as u32;
        let height = (size.height.max(0.0) * pixel_ratio).round() as u32;
        self.pixels = RgbaImage::new(width, height);
        self.size = size;
        self.pixel_ratio = pixel_ratio;
        self.paint = [0, 0, 0, 255];
        self.line_width = 1.0;
        self.cursor = None;
    }

    fn set_paint(&mut self, color: &Color) {
        self.paint = color.rgba();
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn fill_disk(&mut self, center: Point, radius: f64) {
        if radius <= 0.0 {
            return;
        }
        let c = self.physical(center);
        let r = radius * self.pixel_ratio;
        self.paint_where(
            Point::new(c.x - r, c.y - r),
            Point::new(c.x + r, c.y + r),
            |x, y| (x - c.x).hypot(y - c.y) <= r,
        );
    }

    fn begin_path(&mut self) {
        self.cursor = None;
    }

    fn move_to(&mut self, point: Point) {
        self.cursor = Some(point);
    }

    fn stroke_line_to(&mut self, point: Point) {
        let Some(from) = self.cursor.replace(point) else {
            return;
        };
        let a = self.physical(from);
        let b = self.physical(point);
        let half = self.line_width * self.pixel_ratio / 2.0;
        self.paint_where(
            Point::new(a.x.min(b.x) - half, a.y.min(b.y) - half),
            Point::new(a.x.max(b.x) + half, a.y.max(b.y) + half),
            |x, y| distance_to_segment(x, y, a, b) <= half,
        );
    }

    fn clear_region(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    fn fill_background(&mut self, color: &Color) {
        let rgba = color.rgba();
        for pixel in self.pixels.pixels_mut() {
            blend(pixel, rgba);
        }
    }

    fn export_image(&self, format: ImageFormat) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        let image = DynamicImage::ImageRgba8(self.pixels.clone());
        match format {
            ImageFormat::Png => image.write_to(&mut out, ImageOutputFormat::Png)?,
            // JPEG has no alpha channel.
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8())
                .write_to(&mut out, ImageOutputFormat::Jpeg(JPEG_QUALITY))?,
            ImageFormat::Bmp => image.write_to(&mut out, ImageOutputFormat::Bmp)?,
            ImageFormat::Gif => image.write_to(&mut out, ImageOutputFormat::Gif)?,
        }
        Ok(out.into_inner())
    }
}
