//! FFI error codes and the thread-local last-error message.

use std::ffi::{c_char, CString};

use timestep_switch_host::HostError;

/// Return codes for `tws_*` functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwsErrorCode {
    Ok = 0,
    /// Null pointer or invalid UTF-8.
    InvalidArgument = -1,
    /// Input was not valid JSON.
    InvalidJson = -2,
    /// JSON parsed but is not a conditioning list.
    MalformedConditioning = -3,
    /// Rejected `TwsCfg`.
    InvalidCfg = -4,
    Internal = -99,
}

impl From<TwsErrorCode> for i32 {
    fn from(code: TwsErrorCode) -> Self {
        code as i32
    }
}

impl From<&HostError> for TwsErrorCode {
    fn from(e: &HostError) -> Self {
        match e {
            HostError::Json(_) => TwsErrorCode::InvalidJson,
            HostError::MalformedEntry { .. } | HostError::InputType { .. } => {
                TwsErrorCode::MalformedConditioning
            }
            HostError::MissingInput(_) => TwsErrorCode::InvalidArgument,
            HostError::Cfg(_) => TwsErrorCode::InvalidCfg,
            HostError::UnknownNode(_) => TwsErrorCode::Internal,
        }
    }
}

thread_local! {
    static LAST_ERROR: std::cell::RefCell<Option<CString>> =
        const { std::cell::RefCell::new(None) };
}

pub fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Record `e` as the last error and return its code.
pub fn fail(e: &HostError) -> i32 {
    set_last_error(&e.to_string());
    TwsErrorCode::from(e).into()
}

/// Last error message on this thread, or NULL.
///
/// The pointer stays valid until the next failing call on the same thread.
#[no_mangle]
pub extern "C" fn tws_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match e.borrow().as_ref() {
        Some(s) => s.as_ptr(),
        None => std::ptr::null(),
    })
}

#[no_mangle]
pub extern "C" fn tws_clear_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}
