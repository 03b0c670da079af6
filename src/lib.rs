//! A freehand drawing widget: speed-responsive "hand-writing" strokes or
//! constant-width lines on a 2D surface, with raster image export.
//!
//! The core ([`HandWrite`], [`StrokeRenderer`], [`InputNormalizer`]) only
//! needs a [`Surface`]; the `web` module binds it to a browser canvas.

pub mod error;
pub mod export;
pub mod input;
pub mod model;
pub mod render;
pub mod state;
pub mod surface;
pub mod util;
pub mod widget;

#[cfg(target_arch = "wasm32")]
pub mod components;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{ConfigError, Error, Result};
pub use export::{DownloadSink, ExportedImage, ImageFormat};
pub use input::{Capabilities, ClientPos, InputNormalizer, RawInput};
pub use model::{ClientRect, Color, DrawConfig, Mode, Point, Size, euclidean};
pub use render::{StrokeRenderer, target_radius, tween};
pub use state::{FrameSlot, StrokeState};
pub use surface::{RasterSurface, Surface};
pub use widget::{HandWrite, StrokeHook, StrokeHooks};
