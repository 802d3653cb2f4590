pub mod cfg;
pub mod error;
pub mod item;
pub mod range;
pub mod split;
pub mod trace;
pub mod window;

pub use cfg::{SwitchCfg, MAX_THRESHOLD_DIGITS};
pub use error::CfgError;
pub use item::{Params, TimedItem};
pub use range::{assign_ranges, round_threshold, RangeAssignment, SplitCase};
pub use split::{split, split_with_cfg, summarize, SplitSummary};
pub use window::{Window, END_KEY, START_KEY};

// Re-exported for `switch_trace!` expansions in downstream crates.
#[doc(hidden)]
pub use tracing;
