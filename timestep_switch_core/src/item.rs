use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::window::{Window, END_KEY, START_KEY};

/// Open-ended, ordered parameter mapping carried by every conditioning entry.
///
/// Only `start_percent` / `end_percent` are interpreted here; every other key is
/// carried through untouched.
pub type Params = Map<String, Value>;

/// One conditioning entry: an opaque reference plus its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimedItem<R> {
    pub reference: R,
    pub params: Params,
}

impl<R> TimedItem<R> {
    pub fn new(reference: R, params: Params) -> Self {
        Self { reference, params }
    }

    /// Entry with no parameters at all (fully active).
    pub fn bare(reference: R) -> Self {
        Self::new(reference, Params::new())
    }

    /// Builder: set both timing keys.
    pub fn with_window(mut self, w: Window) -> Self {
        set_window(&mut self.params, w);
        self
    }

    /// Builder: set an arbitrary parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// The item's own active window. Missing keys default to the full timeline.
    pub fn window(&self) -> Window {
        Window {
            start: read_percent(&self.params, START_KEY, Window::FULL.start),
            end: read_percent(&self.params, END_KEY, Window::FULL.end),
        }
    }

    #[inline]
    pub fn is_silenced(&self) -> bool {
        self.window().is_silenced()
    }
}

impl<R: Clone> TimedItem<R> {
    /// Fresh copy with the timing keys overwritten. `self` is left as is.
    pub fn rewindowed(&self, w: Window) -> TimedItem<R> {
        let mut params = self.params.clone();
        set_window(&mut params, w);
        TimedItem {
            reference: self.reference.clone(),
            params,
        }
    }
}

fn set_window(params: &mut Params, w: Window) {
    params.insert(START_KEY.to_string(), Value::from(w.start));
    params.insert(END_KEY.to_string(), Value::from(w.end));
}

fn read_percent(params: &Params, key: &str, default: f64) -> f64 {
    match params.get(key) {
        None | Some(Value::Null) => default,
        Some(v) => match v.as_f64() {
            Some(x) => x,
            None => {
                crate::switch_trace!(key, value = %v, "non-numeric timing value, using default {}", default);
                default
            }
        },
    }
}
