// ---------------------------------------------------------------------
// Active windows on the normalized [0, 1] diffusion timeline
// ---------------------------------------------------------------------

use serde::{Deserialize, Serialize};

/// Parameter key holding the start of an item's active window.
pub const START_KEY: &str = "start_percent";
/// Parameter key holding the end of an item's active window.
pub const END_KEY: &str = "end_percent";

/// Half-open `[start, end)` window in normalized progress.
///
/// `start > end` is the silenced convention: the downstream sampler treats such
/// a window as never active.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub start: f64,
    pub end: f64,
}

impl Default for Window {
    fn default() -> Self {
        Window::FULL
    }
}

impl Window {
    /// Active for the whole timeline.
    pub const FULL: Window = Window { start: 0.0, end: 1.0 };

    /// Canonical "never active" sentinel.
    pub const SILENCED: Window = Window { start: 1.0, end: 0.0 };

    pub const fn new(start: f64, end: f64) -> Self {
        Window { start, end }
    }

    /// True for the exact `(1.0, 0.0)` sentinel.
    #[inline]
    pub fn is_silenced(&self) -> bool {
        self.start == 1.0 && self.end == 0.0
    }

    /// True when the window covers no instant at all (`start >= end`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Overlap of this window with `limit`.
    ///
    /// Always narrows. An empty or inverted overlap collapses to `Window::SILENCED`,
    /// so intersecting a silenced window again stays silenced.
    pub fn intersect(&self, limit: Window) -> Window {
        let start = self.start.max(limit.start);
        let end = self.end.min(limit.end);

        if start >= end {
            return Window::SILENCED;
        }
        Window { start, end }
    }
}
