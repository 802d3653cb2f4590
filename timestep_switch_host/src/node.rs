//! Node descriptors and the registry the host reads at plugin load.

use std::collections::BTreeMap;

use serde::Serialize;

use timestep_switch_core::switch_trace;

use crate::error::{HostError, HostResult};

pub const SWITCH_NODE_ID: &str = "ConditioningTimestepSwitch";
pub const SWITCH_DISPLAY_NAME: &str = "Conditioning Timestep Switch";
pub const SWITCH_CATEGORY: &str = "advanced/conditioning";
pub const SWITCH_FUNCTION: &str = "switch_conditioning";

pub const INPUT_CONDITIONING_1: &str = "conditioning_1";
pub const INPUT_THRESHOLD: &str = "threshold";
pub const INPUT_CONDITIONING_2: &str = "conditioning_2";

/// Socket type of a node input or output, as the host names it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputKind {
    Conditioning,
    Float {
        default: f64,
        min: f64,
        max: f64,
        step: f64,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InputSpec {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: InputKind,
    pub tooltip: &'static str,
}

/// Everything the host UI needs to show and wire a node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub function: &'static str,
    pub required: Vec<InputSpec>,
    pub optional: Vec<InputSpec>,
    pub return_types: Vec<&'static str>,
}

impl NodeDescriptor {
    /// Look up an input by name in both the required and optional lists.
    pub fn input(&self, name: &str) -> Option<&InputSpec> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .find(|i| i.name == name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|i| i.name == name)
    }
}

/// Descriptor for the conditioning timestep switch.
pub fn switch_descriptor() -> NodeDescriptor {
    NodeDescriptor {
        id: SWITCH_NODE_ID,
        display_name: SWITCH_DISPLAY_NAME,
        category: SWITCH_CATEGORY,
        function: SWITCH_FUNCTION,
        required: vec![
            InputSpec {
                name: INPUT_CONDITIONING_1,
                kind: InputKind::Conditioning,
                tooltip: "Conditioning active BEFORE the threshold (Start)",
            },
            InputSpec {
                name: INPUT_THRESHOLD,
                kind: InputKind::Float {
                    default: 0.1,
                    min: 0.0,
                    max: 1.0,
                    step: 0.01,
                },
                tooltip: "The switching point (0.0 to 1.0)",
            },
        ],
        optional: vec![InputSpec {
            name: INPUT_CONDITIONING_2,
            kind: InputKind::Conditioning,
            tooltip: "Conditioning active AFTER the threshold (End). If not provided, nothing happens after the threshold.",
        }],
        return_types: vec!["CONDITIONING"],
    }
}

/// Class and display-name mappings, keyed by node id.
///
/// Deterministic ordering: ids iterate sorted.
#[derive(Clone, Debug, Default)]
pub struct NodeRegistry {
    nodes: BTreeMap<&'static str, NodeDescriptor>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every node this crate ships.
    pub fn with_builtin() -> Self {
        let mut r = Self::new();
        r.register(switch_descriptor());
        r
    }

    /// Register a descriptor. Returns the previous descriptor under the same id, if any.
    pub fn register(&mut self, desc: NodeDescriptor) -> Option<NodeDescriptor> {
        let prev = self.nodes.insert(desc.id, desc);
        if let Some(p) = &prev {
            switch_trace!(id = p.id, "node re-registered, replacing");
        }
        prev
    }

    pub fn get(&self, id: &str) -> Option<&NodeDescriptor> {
        self.nodes.get(id)
    }

    /// Like `get`, but an unknown id is an error.
    pub fn require(&self, id: &str) -> HostResult<&NodeDescriptor> {
        self.nodes
            .get(id)
            .ok_or_else(|| HostError::UnknownNode(id.to_string()))
    }

    pub fn display_name(&self, id: &str) -> Option<&'static str> {
        self.nodes.get(id).map(|d| d.display_name)
    }

    /// `id -> display name` pairs, sorted by id.
    pub fn display_names(&self) -> Vec<(&'static str, &'static str)> {
        self.nodes.values().map(|d| (d.id, d.display_name)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeDescriptor> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
