//! The switch node as the host calls it.
//!
//! Responsibilities:
//! - read node inputs by name (`conditioning_1`, `threshold`, `conditioning_2`)
//! - decode host records through a `ConditioningAdapter`
//! - run the core split
//! - encode the merged list back into the host shape

use serde_json::{Map, Value};

use timestep_switch_core::{split_with_cfg, switch_trace, SwitchCfg, TimedItem};

use crate::adapter::{ConditioningAdapter, JsonConditioningAdapter};
use crate::cfg::HostCfg;
use crate::error::{HostError, HostResult};
use crate::node::{INPUT_CONDITIONING_1, INPUT_CONDITIONING_2, INPUT_THRESHOLD};

#[derive(Clone, Debug)]
pub struct TimestepSwitchNode<A = JsonConditioningAdapter> {
    cfg: SwitchCfg,
    adapter: A,
}

impl Default for TimestepSwitchNode<JsonConditioningAdapter> {
    fn default() -> Self {
        Self::new(SwitchCfg::default())
    }
}

impl TimestepSwitchNode<JsonConditioningAdapter> {
    pub fn new(cfg: SwitchCfg) -> Self {
        Self::with_adapter(cfg, JsonConditioningAdapter)
    }

    /// Build from host config. Also applies the debug toggle.
    pub fn from_host_cfg(cfg: &HostCfg) -> HostResult<Self> {
        cfg.switch.validate()?;
        cfg.apply();
        Ok(Self::new(cfg.switch))
    }
}

impl<A: ConditioningAdapter> TimestepSwitchNode<A> {
    pub fn with_adapter(cfg: SwitchCfg, adapter: A) -> Self {
        Self { cfg, adapter }
    }

    pub fn cfg(&self) -> &SwitchCfg {
        &self.cfg
    }

    /// Typed entry point.
    pub fn switch_conditioning(
        &self,
        conditioning_1: &[TimedItem<A::Ref>],
        threshold: f64,
        conditioning_2: Option<&[TimedItem<A::Ref>]>,
    ) -> Vec<TimedItem<A::Ref>> {
        split_with_cfg(conditioning_1, threshold, conditioning_2, &self.cfg)
    }

    /// Host entry point: inputs keyed by name, output in the host's conditioning shape.
    ///
    /// A missing or `null` `conditioning_2` is the absent shape. Thresholds outside
    /// [0, 1] are accepted.
    pub fn invoke(&self, inputs: &Map<String, Value>) -> HostResult<Value> {
        let c1_raw = inputs
            .get(INPUT_CONDITIONING_1)
            .filter(|v| !v.is_null())
            .ok_or(HostError::MissingInput(INPUT_CONDITIONING_1))?;

        let threshold = inputs
            .get(INPUT_THRESHOLD)
            .ok_or(HostError::MissingInput(INPUT_THRESHOLD))?
            .as_f64()
            .ok_or(HostError::InputType {
                name: INPUT_THRESHOLD,
                expected: "number",
            })?;

        let c1 = self.adapter.decode(c1_raw)?;
        let c2 = match inputs.get(INPUT_CONDITIONING_2) {
            None | Some(Value::Null) => None,
            Some(v) => Some(self.adapter.decode(v)?),
        };

        switch_trace!(
            c1 = c1.len(),
            c2_present = c2.is_some(),
            threshold,
            "invoke"
        );

        let out = self.switch_conditioning(&c1, threshold, c2.as_deref());
        Ok(self.adapter.encode(&out))
    }

    /// Split two conditioning lists given as JSON text. `None` is the absent second input.
    pub fn switch_json_strs(
        &self,
        conditioning_1: &str,
        threshold: f64,
        conditioning_2: Option<&str>,
    ) -> HostResult<Value> {
        let c1 = self
            .adapter
            .decode(&serde_json::from_str::<Value>(conditioning_1)?)?;
        let c2 = match conditioning_2 {
            Some(s) => Some(self.adapter.decode(&serde_json::from_str::<Value>(s)?)?),
            None => None,
        };

        let out = self.switch_conditioning(&c1, threshold, c2.as_deref());
        Ok(self.adapter.encode(&out))
    }

    /// Same as `invoke`, from a JSON object string.
    pub fn invoke_json_str(&self, inputs: &str) -> HostResult<Value> {
        let value: Value = serde_json::from_str(inputs)?;
        match value {
            Value::Object(m) => self.invoke(&m),
            _ => Err(HostError::InputType {
                name: "inputs",
                expected: "JSON object",
            }),
        }
    }
}
