use thiserror::Error;

/// Rejected `SwitchCfg` values.
///
/// The split itself never fails; only a caller-built config can be invalid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CfgError {
    #[error("boundary_epsilon must be finite and in [0, 1), got {0}")]
    BoundaryEpsilon(f64),

    #[error("threshold_digits must be at most {max}, got {got}")]
    ThresholdDigits { got: u32, max: u32 },
}
