//! TimeWindowSplitter: route two conditioning collections to either side of a threshold.

use serde::{Deserialize, Serialize};

use crate::cfg::SwitchCfg;
use crate::item::TimedItem;
use crate::range::{assign_ranges, RangeAssignment};
use crate::switch_trace;
use crate::window::Window;

/// Counts over a processed output list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    pub total: usize,
    pub active: usize,
    pub silenced: usize,
}

pub fn summarize<R>(items: &[TimedItem<R>]) -> SplitSummary {
    let silenced = items.iter().filter(|it| it.is_silenced()).count();
    SplitSummary {
        total: items.len(),
        active: items.len() - silenced,
        silenced,
    }
}

/// Split with the default config (epsilon tie-break, 6-digit rounding).
pub fn split<R: Clone>(
    collection_1: &[TimedItem<R>],
    threshold: f64,
    collection_2: Option<&[TimedItem<R>]>,
) -> Vec<TimedItem<R>> {
    split_with_cfg(collection_1, threshold, collection_2, &SwitchCfg::default())
}

/// Intersect every item of `collection_1` with the range before the threshold and every
/// item of `collection_2` with the range after it.
///
/// Output holds the collection 1 items, then the collection 2 items, each in input order.
/// Nothing is dropped: items with no overlap come back silenced. Inputs are not touched.
pub fn split_with_cfg<R: Clone>(
    collection_1: &[TimedItem<R>],
    threshold: f64,
    collection_2: Option<&[TimedItem<R>]>,
    cfg: &SwitchCfg,
) -> Vec<TimedItem<R>> {
    let ranges = assign_ranges(threshold, cfg);
    switch_trace!(
        threshold = ranges.threshold,
        epsilon = cfg.boundary_epsilon,
        case = ?ranges.case,
        c1 = collection_1.len(),
        c2 = ?collection_2.map(|c| c.len()),
        "switch_conditioning"
    );

    let extra = collection_2.map_or(0, |c| c.len());
    let mut out = Vec::with_capacity(collection_1.len() + extra);

    route(collection_1, ranges.before, "conditioning_1", &mut out);
    if let Some(c2) = collection_2 {
        route(c2, ranges.after, "conditioning_2", &mut out);
    }

    log_summary(&ranges, &out);
    out
}

fn route<R: Clone>(items: &[TimedItem<R>], limit: Window, slot: &str, out: &mut Vec<TimedItem<R>>) {
    switch_trace!(slot, start = limit.start, end = limit.end, "processing collection");

    for (i, item) in items.iter().enumerate() {
        let own = item.window();
        let w = own.intersect(limit);
        switch_trace!(
            slot,
            index = i,
            own_start = own.start,
            own_end = own.end,
            new_start = w.start,
            new_end = w.end,
            silenced = w.is_silenced(),
            "intersected"
        );
        out.push(item.rewindowed(w));
    }
}

fn log_summary<R>(ranges: &RangeAssignment, out: &[TimedItem<R>]) {
    if !crate::trace::enabled() {
        return;
    }
    let s = summarize(out);
    switch_trace!(
        case = ?ranges.case,
        total = s.total,
        active = s.active,
        silenced = s.silenced,
        "final output"
    );
}
