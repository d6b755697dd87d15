//! Native stack growth for nested calls.
//!
//! Subroutine calls execute recursively inside one interpreter, and plugins
//! such as `Repeat` spawn further interpreters, so call depth is driven by
//! the script. Every call goes through [`ensure_sufficient_stack`], which
//! grows the native stack with `stacker` when it runs low; nesting is then
//! bounded by available memory instead of the thread's stack size.
//!
//! On WASM targets the closure runs directly.

/// Remaining stack below which a new segment is allocated (128KB).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the native stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
