#![allow(clippy::missing_safety_doc)]

use std::ptr;

use timestep_switch_core::{trace, SwitchCfg};
use timestep_switch_host::{switch_descriptor, HostCfg, HostError, TimestepSwitchNode};

pub mod error;

pub use error::{tws_clear_error, tws_last_error, TwsErrorCode};

use error::{fail, set_last_error};

/// FFI ABI version for timestep_switch_ffi.
///
/// Bump this when any `#[repr(C)]` struct layout or exported function signature changes.
pub const TWS_FFI_VERSION: u32 = 1;

#[no_mangle]
pub extern "C" fn tws_ffi_version() -> u32 {
    TWS_FFI_VERSION
}

/// FFI string view (UTF-8 bytes). A null `ptr` means "absent".
#[repr(C)]
#[derive(Clone, Copy)]
pub struct TwsStr {
    pub ptr: *const u8,
    pub len: usize,
}

impl TwsStr {
    pub const NULL: TwsStr = TwsStr { ptr: ptr::null(), len: 0 };

    fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    unsafe fn as_str(&self) -> Option<&str> {
        if self.ptr.is_null() {
            return None;
        }
        let bytes = std::slice::from_raw_parts(self.ptr, self.len);
        std::str::from_utf8(bytes).ok()
    }
}

/// Owned byte buffer (UTF-8 JSON). Free with `tws_bytes_free`.
#[repr(C)]
pub struct TwsBytes {
    pub ptr: *mut u8,
    pub len: usize,
}

impl TwsBytes {
    fn empty() -> Self {
        TwsBytes { ptr: ptr::null_mut(), len: 0 }
    }

    fn from_vec(buf: Vec<u8>) -> Self {
        let mut boxed = buf.into_boxed_slice();
        let ptr = boxed.as_mut_ptr();
        let len = boxed.len();
        // Leaked to the caller; freed by tws_bytes_free
        std::mem::forget(boxed);
        TwsBytes { ptr, len }
    }
}

/// Switch cfg for FFI.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct TwsCfg {
    pub boundary_epsilon: f64,
    pub threshold_digits: u32,
    /// Nonzero turns on process-wide diagnostic output.
    pub debug_log: u8,
}

#[no_mangle]
pub extern "C" fn tws_cfg_default() -> TwsCfg {
    let d = HostCfg::default();
    TwsCfg {
        boundary_epsilon: d.switch.boundary_epsilon,
        threshold_digits: d.switch.threshold_digits,
        debug_log: if d.debug_log { 1 } else { 0 },
    }
}

fn cfg_from_ffi(c: TwsCfg) -> HostCfg {
    HostCfg {
        debug_log: c.debug_log != 0,
        switch: SwitchCfg {
            boundary_epsilon: c.boundary_epsilon,
            threshold_digits: c.threshold_digits,
        },
    }
}

#[no_mangle]
pub extern "C" fn tws_set_debug_log(on: u8) {
    trace::set_enabled(on != 0);
}

/// Node descriptor as JSON (id, display name, category, inputs, return types).
#[no_mangle]
pub extern "C" fn tws_node_descriptor_json() -> TwsBytes {
    match serde_json::to_vec(&switch_descriptor()) {
        Ok(buf) => TwsBytes::from_vec(buf),
        Err(e) => {
            set_last_error(&e.to_string());
            TwsBytes::empty()
        }
    }
}

/// Run the switch over two JSON conditioning lists (`[[ref, {params}], ...]`).
///
/// `conditioning_2` with a null `ptr` is the absent input. On success writes an owned JSON
/// buffer to `out` (free with `tws_bytes_free`) and returns 0. On failure returns a
/// negative `TwsErrorCode`, leaves `out` empty, and sets `tws_last_error`.
#[no_mangle]
pub unsafe extern "C" fn tws_switch_json(
    cfg: TwsCfg,
    conditioning_1: TwsStr,
    threshold: f64,
    conditioning_2: TwsStr,
    out: *mut TwsBytes,
) -> i32 {
    if out.is_null() {
        set_last_error("out is null");
        return TwsErrorCode::InvalidArgument.into();
    }
    out.write(TwsBytes::empty());

    let c1_str = match conditioning_1.as_str() {
        Some(s) => s,
        None => {
            set_last_error("conditioning_1 is null or not UTF-8");
            return TwsErrorCode::InvalidArgument.into();
        }
    };
    let c2_str = if conditioning_2.is_null() {
        None
    } else {
        match conditioning_2.as_str() {
            Some(s) => Some(s),
            None => {
                set_last_error("conditioning_2 is not UTF-8");
                return TwsErrorCode::InvalidArgument.into();
            }
        }
    };

    let node = match TimestepSwitchNode::from_host_cfg(&cfg_from_ffi(cfg)) {
        Ok(n) => n,
        Err(e) => return fail(&e),
    };

    match run(&node, c1_str, threshold, c2_str) {
        Ok(buf) => {
            out.write(TwsBytes::from_vec(buf));
            TwsErrorCode::Ok.into()
        }
        Err(e) => fail(&e),
    }
}

fn run(
    node: &TimestepSwitchNode,
    c1: &str,
    threshold: f64,
    c2: Option<&str>,
) -> Result<Vec<u8>, HostError> {
    let merged = node.switch_json_strs(c1, threshold, c2)?;
    Ok(serde_json::to_vec(&merged)?)
}

#[no_mangle]
pub unsafe extern "C" fn tws_bytes_free(b: TwsBytes) {
    if !b.ptr.is_null() {
        let slice_ptr = std::ptr::slice_from_raw_parts_mut(b.ptr, b.len);
        drop(Box::from_raw(slice_ptr));
    }
}
