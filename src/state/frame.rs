// Single-slot debounce for move samples: at most one pending redraw per display tick.
// The newest offered value always replaces the pending one; nothing is queued.
#[derive(Debug, Clone)]
pub struct FrameSlot<T> {
    latest: Option<T>,
    scheduled: bool,
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self {
            latest: None,
            scheduled: false,
        }
    }
}

impl<T> FrameSlot<T> {
    /// Stores `value` as the sample for the next tick. Returns `true` when the
    /// caller must schedule a tick (none is pending yet).
    pub fn offer(&mut self, value: T) -> bool {
        self.latest = Some(value);
        if self.scheduled {
            false
        } else {
            self.scheduled = true;
            true
        }
    }

    /// Called from the scheduled tick. Clears the pending flag and yields the newest sample.
    pub fn take(&mut self) -> Option<T> {
        self.scheduled = false;
        self.latest.take()
    }

    /// Drops any pending sample. Returns the dropped sample, if there was one.
    pub fn cancel(&mut self) -> Option<T> {
        self.scheduled = false;
        self.latest.take()
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }
}
