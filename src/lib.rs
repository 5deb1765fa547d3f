//! probemap: a single-threaded, open-addressing hash map over a
//! growth-managed flat buffer, with NaN-boxed 64-bit values.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: build the map in small, separately testable layers so each
//!   contract can be reasoned about on its own.
//! - Layers:
//!   - TaggedValue: one 64-bit word encoding a double, nil, a boolean, or
//!     a raw pointer payload via reserved quiet-NaN bit patterns.
//!   - GrowBuffer<T>: contiguous capacity-managed storage with an exact
//!     double-on-threshold, overflow-checked growth rule. A fixed logical
//!     address space, not an append-only list.
//!   - Strategy / LinearProbe: slot selection as a pluggable capability.
//!     The strategy receives the bucket storage, the key bytes, and the
//!     declared length, resolves collisions internally (linear probing,
//!     step 1, modular wraparound), and returns one definitive index. The
//!     64-bit digest is its own collaborator (ByteHash, default xxHash64).
//!   - ProbeMap: ties the above together; crossing capacity * load_factor
//!     doubles the buffer and rehashes every live entry.
//!
//! Constraints
//! - Single-threaded, synchronous: no locking, no suspension points;
//!   mutation requires `&mut self`, so external synchronization is the
//!   borrow checker's problem, not ours.
//! - Keys are borrowed `&[u8]`: the map never owns key bytes, and the
//!   compiler makes them outlive the map. Pointer-tagged payloads remain
//!   raw addresses the map never dereferences; their lifetime stays with
//!   the caller.
//! - Vacancy is an explicit `Option`, not a magic all-zero bucket, so an
//!   all-zero key/value pair is a legal entry.
//!
//! Failure model
//! - Every failure is a local `Result`: out-of-range indices, overflowing
//!   capacity arithmetic, allocation refusal, malformed key lengths, and
//!   fully loaded tables each have an [`Error`] variant. Absence is not a
//!   failure: `get` of a missing key is [`TaggedValue::NIL`] and `delete`
//!   of a missing key is `Ok(false)`.
//!
//! Deletion
//! - `delete` vacates the slot and runs a full compaction rehash, keeping
//!   probe chains intact without tombstones. There is no shrink-on-delete.
//!
//! Notes and non-goals
//! - No internal synchronization; concurrent mutation needs external
//!   locking supplied by the host.
//! - No persistence, no iteration-order guarantee beyond bucket address
//!   order.
//! - Lookup cost is amortized O(1) under low clustering; growth factor is
//!   exactly 2x.

pub mod buffer;
pub mod error;
pub mod map;
pub mod strategy;
pub mod value;

// Public surface
pub use buffer::GrowBuffer;
pub use error::Error;
pub use map::{Bucket, ProbeMap, Slot};
pub use strategy::{ByteHash, LinearProbe, Strategy, Xxh64};
pub use value::{Decoded, TaggedValue};
