//! Stroke renderer: turns successive samples into filled disks (hand-writing mode)
//! or an incrementally stroked path (linear mode).

use tracing::trace;

use crate::model::{DrawConfig, Mode, Point, euclidean};
use crate::state::StrokeState;
use crate::surface::Surface;

/// Samples closer than this to the previous one are treated as jitter.
pub const MIN_SEGMENT_DISTANCE: f64 = 2.0;

/// Radius a segment of length `distance` ramps towards: `maxWidth/2` when still,
/// `minWidth/2` at or above `writeSpeed`, linear in between.
pub fn target_radius(distance: f64, config: &DrawConfig) -> f64 {
    let rate = (distance / config.write_speed).min(1.0);
    let (min_r, max_r) = (config.min_radius(), config.max_radius());
    min_r + (max_r - min_r) * (1.0 - rate)
}

/// Evenly spaced disks from `from` towards `to`, excluding `to` itself.
/// `round(distance / 2) + 1` steps keep consecutive disks at most ~2px apart.
pub fn tween(
    from: Point,
    to: Point,
    from_radius: f64,
    to_radius: f64,
) -> impl Iterator<Item = (Point, f64)> {
    let distance = euclidean(to, Some(from));
    let steps = (distance / 2.0).round() as usize + 1;
    (0..steps).map(move |i| {
        let t = i as f64 / steps as f64;
        (from.lerp(to, t), from_radius + (to_radius - from_radius) * t)
    })
}

#[derive(Debug, Clone, Default)]
pub struct StrokeRenderer {
    state: StrokeState,
}

impl StrokeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &StrokeState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Starts a stroke at `point`, discarding any stroke that never ended.
    /// A single dot is drawn so that a tap without movement leaves a mark.
    pub fn begin(&mut self, point: Point, config: &DrawConfig, surface: &mut impl Surface) {
        self.state = StrokeState::begin(point, config.mode);
        match config.mode {
            Mode::Handwriting => surface.fill_disk(point, config.min_radius()),
            Mode::Linear => {
                surface.fill_disk(point, config.linear_width() / 2.0);
                surface.begin_path();
                surface.move_to(point);
            }
        }
    }

    /// Feeds the next sample. Returns whether anything was drawn.
    pub fn extend(&mut self, point: Point, config: &DrawConfig, surface: &mut impl Surface) -> bool {
        match self.state.mode {
            Mode::Handwriting => self.extend_arc(point, config, surface),
            Mode::Linear => self.extend_line(point, surface),
        }
    }

    /// Draws the final sample and returns to idle.
    pub fn finish(&mut self, point: Point, config: &DrawConfig, surface: &mut impl Surface) {
        self.extend(point, config, surface);
        self.state.reset();
    }

    /// Returns to idle without drawing.
    pub fn abort(&mut self) {
        self.state.reset();
    }

    fn extend_arc(&mut self, point: Point, config: &DrawConfig, surface: &mut impl Surface) -> bool {
        let Some(last) = self.state.last_point else {
            return false;
        };
        let distance = euclidean(point, Some(last));
        if distance < MIN_SEGMENT_DISTANCE {
            return false;
        }
        let target = target_radius(distance, config);
        // A fresh stroke ramps up from the thinnest width.
        let start = if self.state.last_radius > 0.0 {
            self.state.last_radius
        } else {
            config.min_radius()
        };
        trace!(distance, start, target, "segment");
        for (center, radius) in tween(last, point, start, target) {
            surface.fill_disk(center, radius);
        }
        self.state.last_radius = target;
        self.state.last_point = Some(point);
        true
    }

    fn extend_line(&mut self, point: Point, surface: &mut impl Surface) -> bool {
        let Some(last) = self.state.last_point else {
            return false;
        };
        if last == point {
            return false;
        }
        surface.stroke_line_to(point);
        self.state.last_point = Some(point);
        true
    }
}
