//! Error types shared by the buffer, strategy, and map layers.

/// Errors reported by `GrowBuffer`, probing strategies, and `ProbeMap`.
///
/// Absence is never an error here: a missed lookup yields
/// [`TaggedValue::NIL`](crate::TaggedValue::NIL) and a missed delete yields
/// `Ok(false)`. Everything below is a condition the caller must decide to
/// retry, abort, or propagate; nothing in the crate panics over them.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An index fell outside the buffer's `[0, capacity)` address space.
    #[error("index {index} out of range for capacity {capacity}")]
    OutOfRange { index: usize, capacity: usize },

    /// Doubling the capacity or bumping the occupied count would exceed
    /// the representable range.
    #[error("capacity arithmetic overflowed")]
    CapacityOverflow,

    /// The allocator refused to provide backing storage of the requested
    /// size.
    #[error("failed to allocate backing storage")]
    AllocationFailure,

    /// A key was presented with a declared length that disagrees with its
    /// actual byte length.
    ///
    /// Strategies reject such input up front instead of hashing it; the
    /// magic all-bits-set index the original contract used for this case
    /// is gone.
    #[error("declared key length {declared} does not match {actual} key bytes")]
    MalformedKey { declared: usize, actual: usize },

    /// Load factors must lie in `(0, 1]`; anything else (including NaN)
    /// is rejected at construction.
    #[error("load factor {0} outside (0, 1]")]
    InvalidLoadFactor(f64),

    /// A map cannot reduce a digest modulo a zero bucket count.
    #[error("capacity must be nonzero")]
    ZeroCapacity,

    /// A probe walked every slot without finding a vacancy or a match.
    /// Only reachable at load factor 1.0 with a fully occupied table.
    #[error("no vacant slot available in a fully loaded table")]
    TableFull,
}
