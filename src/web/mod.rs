//! Browser glue: canvas surface, DOM event subscription and downloads.

mod binding;
mod canvas;
mod download;

pub use binding::{Binding, SharedWidget, detect_capabilities};
pub use canvas::{CanvasSurface, device_pixel_ratio};
pub use download::AnchorDownload;

use wasm_bindgen::JsValue;

use crate::error::Error;

pub(crate) fn js_error(value: JsValue) -> Error {
    Error::Canvas(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}
