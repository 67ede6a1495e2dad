//! Opaque component handles.

use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque identity for a public-facing object (a form, a window) that owns a
/// logical component.
///
/// Handles are cheap to copy and unique for the lifetime of the process.
/// They carry no behavior; the [`ComponentRegistry`](super::ComponentRegistry)
/// resolves a handle back to its component during event dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

impl Handle {
    /// Allocate a fresh, process-unique handle.
    pub fn new() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::new()
    }
}
