//! timestep_switch_host
//!
//! Host-facing layer around `timestep_switch_core`.
//!
//! Responsibilities:
//! - describe the node to the host (id, display name, category, parameter metadata)
//! - convert the host's conditioning records into `TimedItem`s and back
//! - invoke the core split by input name
//!
//! Non-goals:
//! - no async
//! - no state between calls

pub mod adapter;
pub mod cfg;
pub mod error;
pub mod node;
pub mod switch;

pub use adapter::{decode_json_str, ConditioningAdapter, JsonConditioningAdapter};

pub use cfg::{HostCfg, DEBUG_ENV};

pub use error::{HostError, HostResult};

pub use node::{
    switch_descriptor,
    InputKind,
    InputSpec,
    NodeDescriptor,
    NodeRegistry,
    SWITCH_DISPLAY_NAME,
    SWITCH_NODE_ID,
};

pub use switch::TimestepSwitchNode;
