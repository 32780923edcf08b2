//! Entry identities and the injectable generator that assigns them.
//!
//! Stores never keep process-wide counters: each store owns (or is handed) an
//! [`IdGenerator`]. [`AtomicIdAllocator`] is the default implementation.

use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{FiletResult, StoreError};

/// Unique, niche-optimized identifier for a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct EntryId(NonZeroU64);

impl EntryId {
    /// Create an `EntryId` from a raw `u64`. Returns `None` if `raw` is zero.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(EntryId)
    }

    /// Get the underlying `u64` value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<NonZeroU64>().map(EntryId)
    }
}

/// Source of fresh entry identities.
pub trait IdGenerator: Send + Sync + std::fmt::Debug {
    /// Produce the next unused identity.
    fn next_id(&self) -> FiletResult<EntryId>;
}

/// Thread-safe sequential allocator starting from 1.
#[derive(Debug)]
pub struct AtomicIdAllocator {
    next: AtomicU64,
}

impl AtomicIdAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Create an allocator that resumes from a given ID.
    pub fn starting_from(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start.max(1)),
        }
    }

    /// Return the next ID that *would* be allocated, without consuming it.
    pub fn peek_next(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl IdGenerator for AtomicIdAllocator {
    fn next_id(&self) -> FiletResult<EntryId> {
        let raw = self.next.fetch_add(1, Ordering::Relaxed);
        EntryId::new(raw).ok_or_else(|| StoreError::IdsExhausted.into())
    }
}

impl Default for AtomicIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
