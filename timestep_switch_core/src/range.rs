//! Threshold → sub-range assignment.

use serde::{Deserialize, Serialize};

use crate::cfg::SwitchCfg;
use crate::window::Window;

/// Which branch of the assignment fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitCase {
    /// Threshold at or below 0 (or NaN): the first collection is never active.
    NeverBefore,
    /// Threshold at or above 1: the second collection is never active.
    AlwaysBefore,
    /// Threshold strictly inside (0, 1).
    Between,
}

/// Sub-ranges handed to the two collections for one call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeAssignment {
    /// Threshold after rounding.
    pub threshold: f64,
    pub case: SplitCase,
    /// Range for collection 1.
    pub before: Window,
    /// Range for collection 2.
    pub after: Window,
}

/// Round to `digits` decimal places from the exact binary value.
///
/// Goes through correctly rounded decimal formatting, so a product like `5e-7 * 1e6` never
/// lands on a spurious `.5`. Non-finite input comes back unchanged.
pub fn round_threshold(threshold: f64, digits: u32) -> f64 {
    format!("{:.*}", digits as usize, threshold)
        .parse::<f64>()
        .unwrap_or(threshold)
}

pub fn assign_ranges(threshold: f64, cfg: &SwitchCfg) -> RangeAssignment {
    let t = round_threshold(threshold, cfg.threshold_digits);

    if t.is_nan() || t <= 0.0 {
        return RangeAssignment {
            threshold: t,
            case: SplitCase::NeverBefore,
            before: Window::new(0.0, 0.0),
            after: Window::new(0.0, 1.0),
        };
    }

    if t >= 1.0 {
        return RangeAssignment {
            threshold: t,
            case: SplitCase::AlwaysBefore,
            before: Window::new(0.0, 1.0),
            after: Window::new(1.0, 1.0),
        };
    }

    let boundary = t + cfg.boundary_epsilon;
    RangeAssignment {
        threshold: t,
        case: SplitCase::Between,
        before: Window::new(0.0, boundary),
        after: Window::new(boundary, 1.0),
    }
}
