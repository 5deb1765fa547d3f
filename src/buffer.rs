//! GrowBuffer: a capacity-managed contiguous buffer with amortized
//! double-on-threshold growth.
//!
//! This is a fixed logical address space up to `capacity`, not an
//! append-only list: `set` writes at any in-range index and never shifts an
//! existing element. Slots start vacant, where "vacant" means holding
//! `T::default()`; the occupied count `size` tracks transitions between
//! vacant and occupied, and growth fires before an occupying write would
//! push `size` past `capacity * load_factor`.

use crate::error::Error;

/// Contiguous storage of `capacity` slots of `T`, doubling under load.
///
/// `T::default()` doubles as the vacant slot, so storing a value equal to
/// the default is indistinguishable from vacating the slot; layers that need
/// to tell the two apart wrap their element in `Option` (as
/// [`ProbeMap`](crate::ProbeMap) does).
#[derive(Clone, Debug)]
pub struct GrowBuffer<T> {
    storage: Vec<T>,
    size: usize,
    cursor: usize,
    load_factor: f64,
}

impl<T: Clone + Default + PartialEq> GrowBuffer<T> {
    /// Creates a buffer of `capacity` vacant slots.
    ///
    /// `load_factor` must lie in `(0, 1]`; anything else, NaN included, is
    /// rejected. Capacity zero is allowed here (the buffer degenerates to
    /// all-rejecting until grown); maps impose their own nonzero floor.
    pub fn with_capacity(capacity: usize, load_factor: f64) -> Result<Self, Error> {
        if !(load_factor > 0.0 && load_factor <= 1.0) {
            return Err(Error::InvalidLoadFactor(load_factor));
        }
        Ok(GrowBuffer {
            storage: Self::vacant_storage(capacity)?,
            size: 0,
            cursor: 0,
            load_factor,
        })
    }

    fn vacant_storage(capacity: usize) -> Result<Vec<T>, Error> {
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(capacity)
            .map_err(|_| Error::AllocationFailure)?;
        storage.resize(capacity, T::default());
        Ok(storage)
    }

    /// Occupied-slot count.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Allocated slot count.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Append position used by [`push`](Self::push); always `<= capacity`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Reads the slot at `index`, or `None` outside `[0, capacity)`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.storage.get(index)
    }

    /// Iterates every slot in address order, vacant ones included.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.storage.iter()
    }

    /// Writes `value` at `index`.
    ///
    /// Occupying a vacant slot counts toward `size` and may grow the buffer
    /// first; overwriting an occupied slot is load-neutral. On any error the
    /// buffer is unchanged.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), Error> {
        if index >= self.capacity() {
            return Err(Error::OutOfRange {
                index,
                capacity: self.capacity(),
            });
        }
        let was_vacant = self.storage[index] == T::default();
        let is_vacant = value == T::default();
        if was_vacant && !is_vacant {
            let new_size = self.size.checked_add(1).ok_or(Error::CapacityOverflow)?;
            if self.over_threshold(new_size) {
                self.grow()?;
            }
            self.size = new_size;
        } else if !was_vacant && is_vacant {
            self.size -= 1;
        }
        self.cursor = self.cursor.max(index + 1);
        self.storage[index] = value;
        Ok(())
    }

    /// Appends `value` at the cursor and advances it.
    ///
    /// Grows when the occupied count crosses the threshold, and also when
    /// the cursor itself has reached capacity, so an append never lands out
    /// of bounds.
    pub fn push(&mut self, value: T) -> Result<(), Error> {
        let new_size = self.size.checked_add(1).ok_or(Error::CapacityOverflow)?;
        if self.over_threshold(new_size) || self.cursor >= self.capacity() {
            self.grow()?;
        }
        let index = self.cursor;
        let was_vacant = self.storage[index] == T::default();
        let is_vacant = value == T::default();
        if was_vacant && !is_vacant {
            self.size = new_size;
        } else if !was_vacant && is_vacant {
            self.size -= 1;
        }
        self.storage[index] = value;
        self.cursor = index + 1;
        Ok(())
    }

    fn over_threshold(&self, prospective_size: usize) -> bool {
        prospective_size as f64 > self.capacity() as f64 * self.load_factor
    }

    /// Doubles capacity, seeding an empty buffer to one slot.
    fn grow(&mut self) -> Result<(), Error> {
        let doubled = match self.capacity() {
            0 => 1,
            cap => cap.checked_mul(2).ok_or(Error::CapacityOverflow)?,
        };
        self.resize(doubled)
    }

    /// Reallocates to `new_capacity` vacant slots, keeping entries at
    /// indices `< min(old, new)`. Shrinking clamps the occupied count and
    /// cursor so the buffer invariants keep holding.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), Error> {
        let mut fresh = Self::vacant_storage(new_capacity)?;
        let keep = self.capacity().min(new_capacity);
        fresh[..keep].clone_from_slice(&self.storage[..keep]);
        self.storage = fresh;
        self.size = self.size.min(new_capacity);
        self.cursor = self.cursor.min(new_capacity);
        Ok(())
    }

    /// Concatenates two buffers into a new one: this buffer's slots laid
    /// out first, `other`'s after, capacity the checked sum of both, load
    /// factor the minimum of the two. The cursor resumes at `other`'s
    /// cursor translated past this buffer's region.
    pub fn concat(&self, other: &Self) -> Result<Self, Error> {
        let capacity = self
            .capacity()
            .checked_add(other.capacity())
            .ok_or(Error::CapacityOverflow)?;
        let mut storage = Self::vacant_storage(capacity)?;
        storage[..self.capacity()].clone_from_slice(&self.storage);
        storage[self.capacity()..].clone_from_slice(&other.storage);
        Ok(GrowBuffer {
            storage,
            size: self.size + other.size,
            cursor: self.capacity() + other.cursor,
            load_factor: self.load_factor.min(other.load_factor),
        })
    }

    /// Re-vacates every slot in place and resets the occupied count and
    /// cursor. Capacity is retained.
    pub fn clear(&mut self) {
        self.storage.fill(T::default());
        self.size = 0;
        self.cursor = 0;
    }

    /// Re-vacates one slot, decrementing the occupied count if the slot was
    /// occupied. Vacating an already vacant slot is a no-op.
    pub fn unset(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.capacity() {
            return Err(Error::OutOfRange {
                index,
                capacity: self.capacity(),
            });
        }
        if self.storage[index] != T::default() {
            self.storage[index] = T::default();
            self.size -= 1;
        }
        Ok(())
    }
}
