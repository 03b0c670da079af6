use crate::model::{Mode, Point};

// Per-stroke interpolation state, owned by one renderer.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct StrokeState {
    /// `None` exactly when no stroke is active.
    pub last_point: Option<Point>,
    /// Radius emitted at the end of the previous segment; 0 at stroke start.
    pub last_radius: f64,
    /// Mode captured when the stroke started.
    pub mode: Mode,
}

impl StrokeState {
    pub fn begin(point: Point, mode: Mode) -> Self {
        Self {
            last_point: Some(point),
            last_radius: 0.0,
            mode,
        }
    }

    pub fn is_active(&self) -> bool {
        self.last_point.is_some()
    }

    pub fn reset(&mut self) {
        self.last_point = None;
        self.last_radius = 0.0;
    }
}
