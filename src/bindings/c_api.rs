//! C API
//!
//! Plain C-compatible symbols for hosts that load the cdylib directly
//! (ctypes, cffi, or a C/C++ program linking against it).

use crate::core::run_counter;
use crate::infrastructure::init_host_logging;

/// Install countlib's stderr subscriber unless the process already has one.
///
/// Optional: `countlib_run_counter` does this itself when tracing is enabled.
#[no_mangle]
pub extern "C" fn countlib_init_logging() {
    init_host_logging();
}

/// Count from 1 to `max_number`, tracing each step when `debug_enable` is set.
/// Always returns 0.
#[no_mangle]
pub extern "C" fn countlib_run_counter(max_number: i32, debug_enable: bool) -> i32 {
    if debug_enable {
        init_host_logging();
    }
    run_counter(max_number, debug_enable)
}
