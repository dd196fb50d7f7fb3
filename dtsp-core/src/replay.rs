//! Slot-local replay cache: a set of 16-byte per-frame UDIDs accepted in the
//! current key rotation slot.

use std::collections::HashSet;

use crate::error::{Error, Result};

/// Outcome of inserting a UDID into the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The UDID was new and is now cached.
    Inserted,
    /// The UDID was already present.
    AlreadyPresent,
}

/// Ordered set of UDIDs accepted within the current slot.
#[derive(Debug, Default)]
pub struct ReplayCache {
    seen: HashSet<[u8; 16]>,
}

impl ReplayCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self { seen: HashSet::new() }
    }

    /// Whether `udid` has already been accepted in the current slot.
    pub fn contains(&self, udid: &[u8; 16]) -> bool {
        self.seen.contains(udid)
    }

    /// Insert `udid`, surfacing allocation failure as [`Error::Full`] rather
    /// than aborting, matching the reference implementation's
    /// allocation-failure contract.
    pub fn insert(&mut self, udid: [u8; 16]) -> Result<Insertion> {
        if self.seen.contains(&udid) {
            return Ok(Insertion::AlreadyPresent);
        }
        self.seen.try_reserve(1).map_err(|_| Error::Full)?;
        self.seen.insert(udid);
        Ok(Insertion::Inserted)
    }

    /// Number of UDIDs currently cached.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Drop every cached entry, as happens on every slot rotation.
    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_duplicate() {
        let mut cache = ReplayCache::new();
        let udid = [7u8; 16];
        assert_eq!(cache.insert(udid).unwrap(), Insertion::Inserted);
        assert!(cache.contains(&udid));
        assert_eq!(cache.insert(udid).unwrap(), Insertion::AlreadyPresent);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_empties_cache() {
        let mut cache = ReplayCache::new();
        cache.insert([1u8; 16]).unwrap();
        cache.insert([2u8; 16]).unwrap();
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }
}
