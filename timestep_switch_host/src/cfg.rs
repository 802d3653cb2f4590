use serde::{Deserialize, Serialize};

use timestep_switch_core::{trace, SwitchCfg};

use crate::error::HostResult;

/// Environment variable that turns on diagnostic output when set to `1`/`true`/`on`.
pub const DEBUG_ENV: &str = "TIMESTEP_SWITCH_DEBUG";

/// Host-side settings for the switch node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostCfg {
    /// Process-wide diagnostic toggle.
    pub debug_log: bool,
    pub switch: SwitchCfg,
}

impl HostCfg {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> HostResult<Self> {
        let cfg: HostCfg = serde_json::from_str(s)?;
        cfg.switch.validate()?;
        Ok(cfg)
    }

    /// Defaults, with `debug_log` taken from `TIMESTEP_SWITCH_DEBUG`.
    pub fn from_env() -> Self {
        let debug_log = std::env::var(DEBUG_ENV)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Self {
            debug_log,
            ..Self::default()
        }
    }

    /// Push the debug toggle into the process-wide trace switch.
    pub fn apply(&self) {
        trace::set_enabled(self.debug_log);
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

