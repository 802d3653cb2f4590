//! Conversion between the host's native conditioning records and `TimedItem`.
//!
//! The host passes conditioning around as a list of `[reference, {params}]` pairs. The
//! reference is whatever handle the host uses for the encoded prompt; this layer never
//! looks inside it.

use serde_json::Value;

use timestep_switch_core::{Params, TimedItem};

use crate::error::{HostError, HostResult};

/// Trait: map a host conditioning value to and from `TimedItem`s.
///
/// Products embedding the switch with a different record shape implement this.
pub trait ConditioningAdapter {
    /// Opaque reference type carried through the switch.
    type Ref: Clone;

    fn decode(&self, value: &Value) -> HostResult<Vec<TimedItem<Self::Ref>>>;

    fn encode(&self, items: &[TimedItem<Self::Ref>]) -> Value;
}

/// Adapter for the JSON wire shape: `[[ref, {params}], ...]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonConditioningAdapter;

impl ConditioningAdapter for JsonConditioningAdapter {
    type Ref = Value;

    fn decode(&self, value: &Value) -> HostResult<Vec<TimedItem<Value>>> {
        let entries = value.as_array().ok_or(HostError::InputType {
            name: "conditioning",
            expected: "list of [reference, params] pairs",
        })?;

        let mut out = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            out.push(decode_entry(index, entry)?);
        }
        Ok(out)
    }

    fn encode(&self, items: &[TimedItem<Value>]) -> Value {
        Value::Array(
            items
                .iter()
                .map(|it| {
                    Value::Array(vec![it.reference.clone(), Value::Object(it.params.clone())])
                })
                .collect(),
        )
    }
}

fn decode_entry(index: usize, entry: &Value) -> HostResult<TimedItem<Value>> {
    let pair = match entry.as_array() {
        Some(p) if p.len() == 2 => p,
        _ => {
            return Err(HostError::MalformedEntry {
                index,
                reason: "expected a [reference, params] pair",
            })
        }
    };

    let params: Params = match &pair[1] {
        Value::Object(m) => m.clone(),
        // An entry without params is fully active.
        Value::Null => Params::new(),
        _ => {
            return Err(HostError::MalformedEntry {
                index,
                reason: "params must be an object",
            })
        }
    };

    Ok(TimedItem::new(pair[0].clone(), params))
}

/// Helper: decode a JSON string holding a conditioning list.
pub fn decode_json_str(s: &str) -> HostResult<Vec<TimedItem<Value>>> {
    let value: Value = serde_json::from_str(s)?;
    JsonConditioningAdapter.decode(&value)
}
