use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::js_error;
use crate::error::{Error, Result};
use crate::export::{ImageFormat, decode_data_url};
use crate::model::{ClientRect, Color, Point, Size};
use crate::surface::Surface;

pub fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .max(1.0)
}

/// A `<canvas>` element drawn through its 2D context.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: Size,
    pixel_ratio: f64,
}

impl CanvasSurface {
    /// Takes over `canvas`, sizing its backing store to its layout size times the device pixel ratio.
    pub fn attach(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| Error::Canvas("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|object| js_error(object.into()))?;
        let mut surface = Self {
            canvas,
            ctx,
            size: Size::default(),
            pixel_ratio: 1.0,
        };
        surface.resize(surface.layout_size(), device_pixel_ratio());
        Ok(surface)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Current CSS layout size of the element.
    pub fn layout_size(&self) -> Size {
        Size::new(
            self.canvas.offset_width() as f64,
            self.canvas.offset_height() as f64,
        )
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn bounding_rect(&self) -> ClientRect {
        let rect = self.canvas.get_bounding_client_rect();
        ClientRect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }

    fn resize(&mut self, size: Size, pixel_ratio: f64) {
        let pixel_ratio = pixel_ratio.max(1.0);
        // Assigning the backing size also resets the context state.
        self.canvas
            .set_width((size.width.max(0.0) * pixel_ratio).round() as u32);
        self.canvas
            .set_height((size.height.max(0.0) * pixel_ratio).round() as u32);
        if let Err(e) = self
            .ctx
            .set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0)
        {
            warn!(error = ?e, pixel_ratio, "setTransform failed");
        }
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
        self.size = size;
        self.pixel_ratio = pixel_ratio;
    }

    fn set_paint(&mut self, color: &Color) {
        self.ctx.set_fill_style_str(color.css());
        self.ctx.set_stroke_style_str(color.css());
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn fill_disk(&mut self, center: Point, radius: f64) {
        if radius <= 0.0 {
            return;
        }
        self.ctx.begin_path();
        match self
            .ctx
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::PI * 2.0)
        {
            Ok(()) => self.ctx.fill(),
            Err(e) => warn!(error = ?e, radius, "arc failed"),
        }
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, point: Point) {
        self.ctx.move_to(point.x, point.y);
    }

    fn stroke_line_to(&mut self, point: Point) {
        self.ctx.line_to(point.x, point.y);
        self.ctx.stroke();
    }

    fn clear_region(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.width, self.size.height);
    }

    fn fill_background(&mut self, color: &Color) {
        if color.is_transparent() {
            return;
        }
        self.ctx.save();
        self.ctx.set_fill_style_str(color.css());
        self.ctx
            .fill_rect(0.0, 0.0, self.size.width, self.size.height);
        self.ctx.restore();
    }

    fn export_image(&self, format: ImageFormat) -> Result<Vec<u8>> {
        let url = self
            .canvas
            .to_data_url_with_type(format.mime_type())
            .map_err(js_error)?;
        decode_data_url(&url)
    }
}
