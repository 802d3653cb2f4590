use serde::{Deserialize, Serialize};

use crate::error::CfgError;

/// Highest rounding precision that still means something for an `f64` in [0, 1].
pub const MAX_THRESHOLD_DIGITS: u32 = 15;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchCfg {
    /// Added to an in-range threshold so the threshold instant itself belongs to
    /// the first collection. `0.0` puts the boundary exactly on the threshold.
    pub boundary_epsilon: f64,
    /// Decimal digits the threshold is rounded to before use.
    pub threshold_digits: u32,
}

impl Default for SwitchCfg {
    fn default() -> Self {
        Self {
            boundary_epsilon: 1e-3,
            threshold_digits: 6,
        }
    }
}

impl SwitchCfg {
    /// Boundary exactly on the threshold, no epsilon.
    pub fn exact() -> Self {
        Self {
            boundary_epsilon: 0.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), CfgError> {
        let eps = self.boundary_epsilon;
        if !eps.is_finite() || eps < 0.0 || eps >= 1.0 {
            return Err(CfgError::BoundaryEpsilon(eps));
        }
        if self.threshold_digits > MAX_THRESHOLD_DIGITS {
            return Err(CfgError::ThresholdDigits {
                got: self.threshold_digits,
                max: MAX_THRESHOLD_DIGITS,
            });
        }
        Ok(())
    }
}
