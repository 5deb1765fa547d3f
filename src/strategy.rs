//! Hashing and probing strategies.
//!
//! The map delegates slot selection entirely to a [`Strategy`]: given the
//! bucket storage, key bytes, and the caller-declared key length, the
//! strategy resolves collisions internally and hands back one definitive
//! index. [`LinearProbe`] is the reference strategy (64-bit digest reduced
//! modulo capacity, then step-1 probing with wraparound); the digest itself
//! comes from a pluggable [`ByteHash`] collaborator defaulting to xxHash64.

use xxhash_rust::xxh64::xxh64;

use crate::buffer::GrowBuffer;
use crate::error::Error;
use crate::map::Slot;

/// External 64-bit digest collaborator: bytes in, digest out.
pub trait ByteHash {
    fn hash64(&self, bytes: &[u8]) -> u64;
}

/// xxHash64 with a fixed seed, the default digest.
#[derive(Copy, Clone, Debug, Default)]
pub struct Xxh64 {
    seed: u64,
}

impl Xxh64 {
    pub fn with_seed(seed: u64) -> Self {
        Xxh64 { seed }
    }
}

impl ByteHash for Xxh64 {
    fn hash64(&self, bytes: &[u8]) -> u64 {
        xxh64(bytes, self.seed)
    }
}

/// Slot-selection contract used by [`ProbeMap`](crate::ProbeMap).
///
/// A strategy must return an index of a slot that is either vacant or
/// already holds the sought key, after resolving any collisions itself.
/// Malformed input is an error, not a magic index.
pub trait Strategy {
    fn locate<'k>(
        &self,
        buckets: &GrowBuffer<Slot<'k>>,
        key: &[u8],
        declared_len: usize,
    ) -> Result<usize, Error>;
}

/// The reference strategy: digest, reduce modulo capacity, linear probe.
#[derive(Copy, Clone, Debug, Default)]
pub struct LinearProbe<H = Xxh64> {
    hasher: H,
}

impl<H: ByteHash> LinearProbe<H> {
    pub fn with_hasher(hasher: H) -> Self {
        LinearProbe { hasher }
    }
}

impl<H: ByteHash> Strategy for LinearProbe<H> {
    fn locate<'k>(
        &self,
        buckets: &GrowBuffer<Slot<'k>>,
        key: &[u8],
        declared_len: usize,
    ) -> Result<usize, Error> {
        if declared_len != key.len() {
            return Err(Error::MalformedKey {
                declared: declared_len,
                actual: key.len(),
            });
        }
        let capacity = buckets.capacity();
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        let digest = self.hasher.hash64(key);
        // Unsigned arithmetic keeps the residue non-negative by itself.
        let mut index = (digest % capacity as u64) as usize;
        for _ in 0..capacity {
            match buckets.get(index) {
                Some(Some(bucket)) if bucket.key == key => return Ok(index),
                Some(Some(_)) => index = (index + 1) % capacity,
                // Vacant slot terminates the probe.
                _ => return Ok(index),
            }
        }
        // Every slot occupied by a different key; only possible at load
        // factor 1.0.
        Err(Error::TableFull)
    }
}
