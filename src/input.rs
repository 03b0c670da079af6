//! Input normalization: raw pointer/touch events to canvas-local points.

use crate::model::{ClientRect, Point};

/// Host-supplied device description, decided once per widget instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub supports_touch_events: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClientPos {
    pub client_x: f64,
    pub client_y: f64,
}

impl ClientPos {
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// Platform-neutral copy of the coordinate-bearing parts of a pointer or touch event.
#[derive(Clone, Debug, PartialEq)]
pub enum RawInput {
    Mouse(ClientPos),
    Touch {
        touches: Vec<ClientPos>,
        /// Touches that changed in this event; the only source of coordinates on touch end.
        changed: Vec<ClientPos>,
    },
}

impl RawInput {
    pub fn mouse(client_x: f64, client_y: f64) -> Self {
        RawInput::Mouse(ClientPos::new(client_x, client_y))
    }

    pub fn touch(client_x: f64, client_y: f64) -> Self {
        let pos = ClientPos::new(client_x, client_y);
        RawInput::Touch {
            touches: vec![pos],
            changed: vec![pos],
        }
    }

    /// A touch end carries no active touches.
    pub fn touch_end(client_x: f64, client_y: f64) -> Self {
        RawInput::Touch {
            touches: Vec::new(),
            changed: vec![ClientPos::new(client_x, client_y)],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputNormalizer {
    capabilities: Capabilities,
    cached_rect: Option<ClientRect>,
}

impl InputNormalizer {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            cached_rect: None,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Maps `input` to a canvas-local point. The bounding rectangle is queried only
    /// while no stroke is active; during a stroke the rectangle captured at its start
    /// is reused even if the page scrolls or the canvas moves.
    pub fn normalize(
        &mut self,
        input: &RawInput,
        stroke_active: bool,
        query_rect: impl FnOnce() -> ClientRect,
    ) -> Option<Point> {
        let pos = self.client_pos(input)?;
        let rect = match self.cached_rect {
            Some(rect) if stroke_active => rect,
            _ => {
                let rect = query_rect();
                self.cached_rect = Some(rect);
                rect
            }
        };
        Some(Point {
            x: pos.client_x - rect.left + 0.5,
            y: pos.client_y - rect.top + 0.5,
        })
    }

    fn client_pos(&self, input: &RawInput) -> Option<ClientPos> {
        match (self.capabilities.supports_touch_events, input) {
            (true, RawInput::Touch { touches, changed }) => {
                touches.first().or_else(|| changed.first()).copied()
            }
            (false, RawInput::Mouse(pos)) => Some(*pos),
            _ => None,
        }
    }
}
