//! Stack growth for deep recursion.
//!
//! Nested input turns directly into native stack depth in two places: candidate
//! streams pull from their sub-streams recursively, and parse trees are cloned,
//! compared and rendered recursively. Both wrap each level in
//! [`ensure_sufficient_stack`].
//!
//! # Platform Support
//!
//! - **Native targets**: uses the `stacker` crate to grow the stack on demand.
//! - **WASM targets**: no-op passthrough (WASM has its own stack management).
//!
//! # Configuration
//!
//! - **Red zone**: 100KB - if less than this remains, we grow the stack
//! - **Growth size**: 1MB - each growth allocates this much additional space

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn depth(node: &Node) -> usize {
///     ensure_sufficient_stack(|| {
///         1 + node.children().iter().map(depth).max().unwrap_or(0)
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
