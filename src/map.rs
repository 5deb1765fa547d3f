//! ProbeMap: open-addressing hash map over `GrowBuffer<Slot>`.
//!
//! Keys are borrowed byte slices; the borrow checker makes the key bytes
//! outlive the map, so the weak-reference contract of the design is
//! enforced rather than merely documented. Values are [`TaggedValue`]
//! words copied in and out whole; a pointer-tagged payload is never
//! dereferenced here and stays the caller's to keep alive.

use crate::buffer::GrowBuffer;
use crate::error::Error;
use crate::strategy::{LinearProbe, Strategy};
use crate::value::TaggedValue;

/// One occupied bucket: an unowned key and its boxed value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bucket<'k> {
    pub key: &'k [u8],
    pub value: TaggedValue,
}

/// A bucket slot. `None` is the vacant state, so a bucket whose key is
/// empty or whose value is all zero bits is still distinguishable from a
/// vacancy.
pub type Slot<'k> = Option<Bucket<'k>>;

/// Open-addressing map from borrowed byte keys to [`TaggedValue`]s.
///
/// Slot selection is delegated wholesale to the [`Strategy`]: the strategy
/// resolves collisions and returns one definitive index, and the map reads
/// and writes that slot through the buffer. Crossing
/// `capacity * load_factor` on insert doubles the buffer and rehashes every
/// live entry against the new capacity.
pub struct ProbeMap<'k, S = LinearProbe> {
    buckets: GrowBuffer<Slot<'k>>,
    strategy: S,
}

impl<'k> ProbeMap<'k> {
    /// Creates a map with the default xxHash64 linear-probing strategy.
    pub fn with_capacity(capacity: usize, load_factor: f64) -> Result<Self, Error> {
        Self::with_strategy(capacity, load_factor, LinearProbe::default())
    }
}

impl<'k, S> ProbeMap<'k, S> {
    /// Live entry count.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Current bucket count.
    pub fn capacity(&self) -> usize {
        self.buckets.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.buckets.load_factor()
    }
}

impl<'k, S: Strategy> ProbeMap<'k, S> {
    /// Creates a map with a caller-chosen strategy. Capacity must be
    /// nonzero and the load factor must lie in `(0, 1]`.
    pub fn with_strategy(capacity: usize, load_factor: f64, strategy: S) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(ProbeMap {
            buckets: GrowBuffer::with_capacity(capacity, load_factor)?,
            strategy,
        })
    }

    /// Inserts or overwrites `key`'s entry.
    ///
    /// If admitting one more entry would push the live count past
    /// `capacity * load_factor`, the buffer doubles (as many times as a
    /// tiny threshold demands) and every live entry is rehashed against
    /// the new capacity before the write lands. Growth is fully settled
    /// before the slot is located, so the written index is never computed
    /// against a stale capacity.
    pub fn add(&mut self, key: &'k [u8], value: TaggedValue) -> Result<(), Error> {
        let prospective = self.len().checked_add(1).ok_or(Error::CapacityOverflow)?;
        if prospective as f64 > self.capacity() as f64 * self.load_factor() {
            let mut doubled = self.capacity();
            while prospective as f64 > doubled as f64 * self.load_factor() {
                doubled = doubled.checked_mul(2).ok_or(Error::CapacityOverflow)?;
            }
            self.buckets.resize(doubled)?;
            self.rehash()?;
        }
        let index = self.strategy.locate(&self.buckets, key, key.len())?;
        self.buckets.set(index, Some(Bucket { key, value }))
    }

    /// Looks up `key`, returning [`TaggedValue::NIL`] when absent.
    ///
    /// Absence is a value, not an error: a vacant slot, a key mismatch, or
    /// a strategy failure all read as nil.
    pub fn get(&self, key: &[u8]) -> TaggedValue {
        let Ok(index) = self.strategy.locate(&self.buckets, key, key.len()) else {
            return TaggedValue::NIL;
        };
        match self.buckets.get(index) {
            Some(Some(bucket)) if bucket.key == key => bucket.value,
            _ => TaggedValue::NIL,
        }
    }

    /// Redistributes every live entry into the current bucket layout.
    ///
    /// Works from a snapshot: clones the storage, clears the live buffer in
    /// place (same capacity), then re-locates and re-sets each occupied
    /// bucket from the snapshot. The first placement failure aborts the
    /// pass. Running this twice without an intervening mutation changes
    /// nothing observable.
    pub fn rehash(&mut self) -> Result<(), Error> {
        let snapshot = self.buckets.clone();
        self.buckets.clear();
        for slot in snapshot.iter() {
            let Some(bucket) = slot else { continue };
            let index = self
                .strategy
                .locate(&self.buckets, bucket.key, bucket.key.len())?;
            self.buckets.set(index, Some(*bucket))?;
        }
        Ok(())
    }

    /// Removes `key`'s entry, reporting whether one was present.
    ///
    /// Removal vacates the slot and then rehashes the whole table, so probe
    /// chains that ran through the vacated slot stay reachable. No
    /// tombstones, no capacity shrink.
    pub fn delete(&mut self, key: &[u8]) -> Result<bool, Error> {
        let index = self.strategy.locate(&self.buckets, key, key.len())?;
        match self.buckets.get(index) {
            Some(Some(bucket)) if bucket.key == key => {
                self.buckets.unset(index)?;
                self.rehash()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Drops every entry in place. Capacity is retained.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

impl<'k, S: core::fmt::Debug> core::fmt::Debug for ProbeMap<'k, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProbeMap")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("load_factor", &self.load_factor())
            .field("strategy", &self.strategy)
            .finish()
    }
}
