use thiserror::Error;

use timestep_switch_core::CfgError;

/// Failures at the host boundary: decoding the host's records or reading node inputs.
///
/// The switch itself cannot fail; these only cover shapes the adapter cannot read.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("missing required input `{0}`")]
    MissingInput(&'static str),

    #[error("input `{name}` is not a {expected}")]
    InputType {
        name: &'static str,
        expected: &'static str,
    },

    #[error("conditioning entry {index}: {reason}")]
    MalformedEntry { index: usize, reason: &'static str },

    #[error("unknown node `{0}`")]
    UnknownNode(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Cfg(#[from] CfgError),
}

pub type HostResult<T> = Result<T, HostError>;
