//! Process-wide diagnostic toggle.
//!
//! Every diagnostic call site in this workspace goes through `switch_trace!`, which checks
//! the toggle before handing the event to `tracing`. Off by default. Flipping it never
//! changes what `split` returns.

use std::sync::atomic::{AtomicBool, Ordering};

/// `tracing` target used by every event emitted from the switch.
pub const TARGET: &str = "timestep_switch";

static ENABLED: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Turn diagnostic output on or off for the whole process.
pub fn set_enabled(on: bool) {
    ENABLED.store(on, Ordering::Relaxed);
}

/// Emit a `tracing::debug!` event on the switch target, only when the toggle is on.
#[macro_export]
macro_rules! switch_trace {
    ($($arg:tt)+) => {
        if $crate::trace::enabled() {
            $crate::tracing::debug!(target: $crate::trace::TARGET, $($arg)+);
        }
    };
}
