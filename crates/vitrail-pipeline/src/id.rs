//! Stable identities for observed pipeline entities.
//!
//! Surfaces and nodes are owned by the host renderer. Observers key their
//! records off these ids and never hold the entities themselves, so an id
//! arriving at a hook may well be one the observer has never seen.

use std::{
    num::NonZeroU64,
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_SURFACE: AtomicU64 = AtomicU64::new(1);
static NEXT_NODE: AtomicU64 = AtomicU64::new(1);

/// Identity of a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(NonZeroU64);

impl SurfaceId {
    /// Mints a fresh id. Ids start at 1 and are never reused.
    pub fn next() -> Self {
        let raw = NEXT_SURFACE.fetch_add(1, Ordering::Relaxed);
        // SAFETY: the counter starts at 1 and only ever increments.
        Self(unsafe { NonZeroU64::new_unchecked(raw) })
    }

    /// Raw numeric value, for logs and diagnostics.
    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

/// Identity of a shader-graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(NonZeroU64);

impl NodeId {
    /// Mints a fresh id. Ids start at 1 and are never reused.
    pub fn next() -> Self {
        let raw = NEXT_NODE.fetch_add(1, Ordering::Relaxed);
        // SAFETY: the counter starts at 1 and only ever increments.
        Self(unsafe { NonZeroU64::new_unchecked(raw) })
    }

    /// Raw numeric value, for logs and diagnostics.
    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

static_assertions::assert_eq_size!(SurfaceId, u64);
static_assertions::assert_eq_size!(Option<SurfaceId>, u64);
static_assertions::assert_eq_size!(NodeId, u64);
static_assertions::assert_eq_size!(Option<NodeId>, u64);
