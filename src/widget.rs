//! The host-facing drawing widget.

use tracing::{debug, info, trace, warn};

use crate::error::Result;
use crate::export::{DownloadSink, ExportedImage, ImageFormat};
use crate::input::{Capabilities, InputNormalizer, RawInput};
use crate::model::{DrawConfig, Mode, Point, Size};
use crate::render::StrokeRenderer;
use crate::state::{FrameSlot, StrokeState};
use crate::surface::Surface;

pub type StrokeHook = Box<dyn FnMut(&RawInput, Point)>;

/// Optional callbacks, invoked synchronously at each stroke phase.
#[derive(Default)]
pub struct StrokeHooks {
    pub before_stroke: Option<StrokeHook>,
    pub during_stroke: Option<StrokeHook>,
    pub after_stroke: Option<StrokeHook>,
}

impl StrokeHooks {
    pub fn before_stroke(mut self, hook: impl FnMut(&RawInput, Point) + 'static) -> Self {
        self.before_stroke = Some(Box::new(hook));
        self
    }

    pub fn during_stroke(mut self, hook: impl FnMut(&RawInput, Point) + 'static) -> Self {
        self.during_stroke = Some(Box::new(hook));
        self
    }

    pub fn after_stroke(mut self, hook: impl FnMut(&RawInput, Point) + 'static) -> Self {
        self.after_stroke = Some(Box::new(hook));
        self
    }
}

fn call(hook: &mut Option<StrokeHook>, input: &RawInput, point: Point) {
    if let Some(hook) = hook.as_mut() {
        hook(input, point);
    }
}

/// One drawing widget bound to one surface. Input arrives as start/move/end
/// phases; moves are coalesced until the host calls [`HandWrite::on_frame`].
pub struct HandWrite<S: Surface> {
    surface: S,
    config: DrawConfig,
    renderer: StrokeRenderer,
    normalizer: InputNormalizer,
    frame: FrameSlot<RawInput>,
    hooks: StrokeHooks,
    destroyed: bool,
}

impl<S: Surface> HandWrite<S> {
    /// Validates `config`, applies its styles and paints the background.
    pub fn new(surface: S, config: DrawConfig, capabilities: Capabilities) -> Result<Self> {
        config.validate()?;
        let mut widget = Self {
            surface,
            config,
            renderer: StrokeRenderer::new(),
            normalizer: InputNormalizer::new(capabilities),
            frame: FrameSlot::default(),
            hooks: StrokeHooks::default(),
            destroyed: false,
        };
        widget.clear();
        Ok(widget)
    }

    pub fn with_hooks(mut self, hooks: StrokeHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn capabilities(&self) -> Capabilities {
        self.normalizer.capabilities()
    }

    pub fn stroke_state(&self) -> &StrokeState {
        self.renderer.state()
    }

    pub fn is_drawing(&self) -> bool {
        self.renderer.is_active()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// Applies to strokes started after this call.
    pub fn set_mode(&mut self, mode: Mode) {
        debug!(?mode, "mode");
        self.config.mode = mode;
    }

    pub fn hand_writing_mode(&mut self) {
        self.set_mode(Mode::Handwriting);
    }

    pub fn linear_mode(&mut self) {
        self.set_mode(Mode::Linear);
    }

    pub fn pointer_start(&mut self, input: &RawInput) -> bool {
        if self.destroyed {
            return false;
        }
        if self.renderer.is_active() {
            warn!("stroke started while another was active; resetting");
            self.renderer.abort();
            self.frame.cancel();
        }
        let surface = &self.surface;
        let Some(point) = self
            .normalizer
            .normalize(input, false, || surface.bounding_rect())
        else {
            trace!("start without usable coordinates");
            return false;
        };
        debug!(x = point.x, y = point.y, mode = ?self.config.mode, "stroke start");
        call(&mut self.hooks.before_stroke, input, point);
        self.renderer.begin(point, &self.config, &mut self.surface);
        true
    }

    /// Queues a move sample. Returns `true` when the host must schedule a frame
    /// callback that ends in [`HandWrite::on_frame`].
    pub fn pointer_move(&mut self, input: RawInput) -> bool {
        if self.destroyed || !self.renderer.is_active() {
            return false;
        }
        self.frame.offer(input)
    }

    /// Draws the newest queued move sample. Returns whether anything was drawn.
    pub fn on_frame(&mut self) -> bool {
        let Some(input) = self.frame.take() else {
            return false;
        };
        if self.destroyed || !self.renderer.is_active() {
            return false;
        }
        let surface = &self.surface;
        let Some(point) = self
            .normalizer
            .normalize(&input, true, || surface.bounding_rect())
        else {
            return false;
        };
        let drawn = self.renderer.extend(point, &self.config, &mut self.surface);
        call(&mut self.hooks.during_stroke, &input, point);
        drawn
    }

    /// Whether a move sample is waiting for the next frame.
    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_scheduled()
    }

    /// Ends the active stroke with one final draw at the end position.
    pub fn pointer_end(&mut self, input: &RawInput) -> bool {
        let pending = self.frame.cancel();
        if self.destroyed || !self.renderer.is_active() {
            return false;
        }
        let surface = &self.surface;
        let point = self
            .normalizer
            .normalize(input, true, || surface.bounding_rect())
            .or_else(|| {
                pending.and_then(|pending| {
                    self.normalizer
                        .normalize(&pending, true, || surface.bounding_rect())
                })
            })
            .or(self.renderer.state().last_point);
        let Some(point) = point else {
            self.renderer.abort();
            return false;
        };
        self.renderer.finish(point, &self.config, &mut self.surface);
        debug!(x = point.x, y = point.y, "stroke end");
        call(&mut self.hooks.after_stroke, input, point);
        true
    }

    /// Erases all content, repaints the background and resets styles and stroke state.
    pub fn clear(&mut self) {
        self.renderer.abort();
        self.frame.cancel();
        self.surface.clear_region();
        self.surface.fill_background(&self.config.background_color);
        self.surface.set_paint(&self.config.paint_color);
        self.surface.set_line_width(self.config.linear_width());
        info!("cleared");
    }

    /// Re-scales the surface for a new logical size or pixel ratio. Content is lost.
    pub fn resize(&mut self, size: Size, pixel_ratio: f64) {
        info!(width = size.width, height = size.height, pixel_ratio, "resize");
        self.surface.resize(size, pixel_ratio);
        self.clear();
    }

    pub fn export(&self, format: &str) -> Result<ExportedImage> {
        let format: ImageFormat = format.parse()?;
        let bytes = self.surface.export_image(format)?;
        info!(%format, len = bytes.len(), "export");
        Ok(ExportedImage { format, bytes })
    }

    pub fn export_image(&self, format: &str) -> Result<Vec<u8>> {
        Ok(self.export(format)?.bytes)
    }

    pub fn export_data_url(&self, format: &str) -> Result<String> {
        Ok(self.export(format)?.data_url())
    }

    pub fn trigger_download(&self, format: &str, sink: &mut impl DownloadSink) -> Result<()> {
        sink.deliver(self.export(format)?)
    }

    /// Stops accepting input. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.renderer.abort();
        self.frame.cancel();
        self.destroyed = true;
        debug!("destroyed");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::Error;
    use crate::render::tests::{Op, Recorder};

    fn widget(config: DrawConfig) -> HandWrite<Recorder> {
        HandWrite::new(Recorder::default(), config, Capabilities::default()).unwrap()
    }

    fn mouse(x: f64, y: f64) -> RawInput {
        RawInput::mouse(x, y)
    }

    #[test]
    fn construction_applies_styles() {
        let w = widget(DrawConfig::default());
        assert_eq!(
            w.surface().ops,
            vec![
                Op::Clear,
                Op::Background("transparent".to_string()),
                Op::Paint("#f00".to_string()),
                Op::LineWidth(13.5),
            ]
        );
    }

    #[test]
    fn invalid_config_fails_fast() {
        let config = DrawConfig {
            min_width: 9.0,
            max_width: 3.0,
            ..Default::default()
        };
        let result = HandWrite::new(Recorder::default(), config, Capabilities::default());
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn moves_are_coalesced_per_frame() {
        let mut w = widget(DrawConfig::default());
        w.pointer_start(&mouse(0.0, 0.0));
        assert!(w.pointer_move(mouse(5.0, 0.0)));
        assert!(!w.pointer_move(mouse(10.0, 0.0)));
        assert!(!w.pointer_move(mouse(20.0, 0.0)));
        assert!(w.on_frame());
        assert_eq!(w.stroke_state().last_point, Some(Point::new(20.5, 0.5)));
        assert!(!w.on_frame());
    }

    #[test]
    fn queued_sample_survives_a_lost_frame() {
        let mut w = widget(DrawConfig::default());
        w.pointer_start(&mouse(0.0, 0.0));
        // The host never gets its frame callback for this request.
        assert!(w.pointer_move(mouse(10.0, 0.0)));
        assert!(!w.pointer_move(mouse(30.0, 0.0)));
        assert!(w.has_pending_frame());
        // Draining synchronously draws the newest sample and re-arms the slot.
        assert!(w.on_frame());
        assert_eq!(w.stroke_state().last_point, Some(Point::new(30.5, 0.5)));
        assert!(!w.has_pending_frame());
        assert!(w.pointer_move(mouse(50.0, 0.0)));
    }

    #[test]
    fn move_without_start_is_absorbed() {
        let mut w = widget(DrawConfig::default());
        let before = w.surface().ops.len();
        assert!(!w.pointer_move(mouse(5.0, 5.0)));
        assert!(!w.on_frame());
        assert!(!w.pointer_end(&mouse(5.0, 5.0)));
        assert_eq!(w.surface().ops.len(), before);
    }

    #[test]
    fn end_cancels_pending_frame_and_draws_end_position() {
        let mut w = widget(DrawConfig::default());
        w.pointer_start(&mouse(0.0, 0.0));
        w.pointer_move(mouse(10.0, 0.0));
        assert!(w.pointer_end(&mouse(30.0, 0.0)));
        assert!(!w.has_pending_frame());
        assert!(!w.is_drawing());
        assert!(!w.on_frame());
        let last = *w.surface().disks().last().unwrap();
        assert!(last.0.x < 30.5 && last.0.x > 28.0);
    }

    #[test]
    fn touch_end_without_coordinates_uses_pending_sample() {
        let mut w = HandWrite::new(
            Recorder::default(),
            DrawConfig::default(),
            Capabilities {
                supports_touch_events: true,
            },
        )
        .unwrap();
        w.pointer_start(&RawInput::touch(0.0, 0.0));
        w.pointer_move(RawInput::touch(40.0, 0.0));
        let bare_end = RawInput::Touch {
            touches: vec![],
            changed: vec![],
        };
        assert!(w.pointer_end(&bare_end));
        let last = *w.surface().disks().last().unwrap();
        assert!(last.0.x > 35.0);
    }

    #[test]
    fn set_mode_applies_to_next_stroke() {
        let mut w = widget(DrawConfig::default());
        w.pointer_start(&mouse(0.0, 0.0));
        w.linear_mode();
        w.pointer_move(mouse(20.0, 0.0));
        w.on_frame();
        assert!(!w.surface().ops.iter().any(|op| matches!(op, Op::LineTo(_))));
        w.pointer_end(&mouse(20.0, 0.0));

        w.pointer_start(&mouse(0.0, 10.0));
        w.pointer_move(mouse(20.0, 10.0));
        w.on_frame();
        assert!(matches!(w.surface().ops.last(), Some(Op::LineTo(_))));
        assert_eq!(w.mode(), Mode::Linear);
    }

    #[test]
    fn hooks_fire_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let hooks = {
            let (a, b, c) = (log.clone(), log.clone(), log.clone());
            StrokeHooks::default()
                .before_stroke(move |_, p| a.borrow_mut().push(("before", p)))
                .during_stroke(move |_, p| b.borrow_mut().push(("during", p)))
                .after_stroke(move |_, p| c.borrow_mut().push(("after", p)))
        };
        let mut w = widget(DrawConfig::default()).with_hooks(hooks);
        w.pointer_start(&mouse(1.0, 1.0));
        w.pointer_move(mouse(9.0, 1.0));
        w.on_frame();
        w.pointer_end(&mouse(19.0, 1.0));
        let phases: Vec<_> = log.borrow().iter().map(|(phase, _)| *phase).collect();
        assert_eq!(phases, ["before", "during", "after"]);
        assert_eq!(log.borrow()[2].1, Point::new(19.5, 1.5));
    }

    #[test]
    fn destroy_blocks_further_input() {
        let mut w = widget(DrawConfig::default());
        w.destroy();
        w.destroy();
        let before = w.surface().ops.len();
        assert!(!w.pointer_start(&mouse(1.0, 1.0)));
        assert!(!w.pointer_move(mouse(9.0, 1.0)));
        assert!(!w.on_frame());
        assert!(!w.pointer_end(&mouse(9.0, 1.0)));
        assert_eq!(w.surface().ops.len(), before);
        assert!(w.is_destroyed());
    }

    #[test]
    fn clear_is_idempotent_and_resets_stroke() {
        let mut w = widget(DrawConfig::default());
        w.pointer_start(&mouse(1.0, 1.0));
        w.clear();
        assert!(!w.is_drawing());
        let ops = w.surface().ops.len();
        w.clear();
        w.clear();
        let tail = &w.surface().ops[ops..];
        assert_eq!(tail[..4], tail[4..]);
    }

    #[test]
    fn export_rejects_unknown_format() {
        let w = widget(DrawConfig::default());
        assert!(matches!(
            w.export_image("tiff"),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn download_goes_to_sink() {
        let w = widget(DrawConfig::default());
        let mut sink: Vec<ExportedImage> = Vec::new();
        w.trigger_download("JPG", &mut sink).unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].format, ImageFormat::Jpeg);
        assert_eq!(sink[0].file_name(), "handwrite.jpeg");
    }
}
