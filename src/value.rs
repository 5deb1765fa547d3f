//! TaggedValue: NaN-boxed 64-bit values (number, nil, boolean, pointer).
//!
//! Every value is one `u64`. Bit patterns that are valid IEEE-754 doubles
//! (including the ordinary `f64::NAN`, whose exponent-adjacent bits do not
//! fill the reserved mask) are numbers. Patterns matching the full reserved
//! quiet-NaN mask carry a tag in their low bits instead; the sign bit on top
//! of the mask marks a pointer, whose low 48 bits are a raw address the
//! container never dereferences.

/// Sign bit of a double; combined with [`QNAN`] it marks a boxed pointer.
const SIGN_BIT: u64 = 0x8000_0000_0000_0000;

/// All-ones exponent plus the quiet and FP-indefinite bits. A word whose
/// bits cover this entire mask cannot be produced by ordinary floating
/// point arithmetic, which frees the remaining bits for tagging.
const QNAN: u64 = 0x7ffc_0000_0000_0000;

const TAG_NIL: u64 = 1;
const TAG_FALSE: u64 = 2;
const TAG_TRUE: u64 = 3;

/// A heterogeneous value packed into a single 64-bit word.
///
/// The layout is bit-exact and stable: `PartialEq`/`Hash` compare raw words,
/// so `TaggedValue::number(0.0) != TaggedValue::number(-0.0)` and two NaN
/// numbers with identical bits compare equal. Use [`decode`](Self::decode)
/// for a sum-type view.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct TaggedValue(u64);

/// Decoded view of a [`TaggedValue`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Decoded {
    Number(f64),
    Bool(bool),
    Nil,
    /// Raw address payload; lifetime and validity are the caller's problem.
    Pointer(usize),
}

impl TaggedValue {
    pub const NIL: Self = TaggedValue(QNAN | TAG_NIL);
    pub const FALSE: Self = TaggedValue(QNAN | TAG_FALSE);
    pub const TRUE: Self = TaggedValue(QNAN | TAG_TRUE);

    /// Boxes a double. All finite, infinite, and ordinary-NaN inputs keep
    /// their exact bits.
    #[inline]
    pub fn number(n: f64) -> Self {
        TaggedValue(n.to_bits())
    }

    #[inline]
    pub fn boolean(b: bool) -> Self {
        if b {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }

    /// Boxes a raw address. Addresses are assumed to fit in 48 bits, which
    /// holds for user-space pointers on the supported targets; higher bits
    /// would collide with the tag mask and decode differently.
    #[inline]
    pub fn pointer(addr: usize) -> Self {
        TaggedValue(SIGN_BIT | QNAN | addr as u64)
    }

    /// Reconstructs a value from a raw word previously obtained with
    /// [`to_bits`](Self::to_bits).
    #[inline]
    pub fn from_bits(bits: u64) -> Self {
        TaggedValue(bits)
    }

    /// The underlying 64-bit word, exactly as stored.
    #[inline]
    pub fn to_bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn is_number(self) -> bool {
        self.0 & QNAN != QNAN
    }

    #[inline]
    pub fn is_nil(self) -> bool {
        self == Self::NIL
    }

    #[inline]
    pub fn is_bool(self) -> bool {
        // FALSE and TRUE differ only in bit 0.
        self.0 | 1 == Self::TRUE.0
    }

    #[inline]
    pub fn is_pointer(self) -> bool {
        self.0 & (SIGN_BIT | QNAN) == SIGN_BIT | QNAN
    }

    #[inline]
    pub fn as_number(self) -> Option<f64> {
        self.is_number().then(|| f64::from_bits(self.0))
    }

    #[inline]
    pub fn as_bool(self) -> Option<bool> {
        self.is_bool().then(|| self == Self::TRUE)
    }

    #[inline]
    pub fn as_pointer(self) -> Option<usize> {
        self.is_pointer()
            .then(|| (self.0 & !(SIGN_BIT | QNAN)) as usize)
    }

    /// Sum-type view of the word.
    pub fn decode(self) -> Decoded {
        if self.is_number() {
            Decoded::Number(f64::from_bits(self.0))
        } else if self.is_pointer() {
            Decoded::Pointer((self.0 & !(SIGN_BIT | QNAN)) as usize)
        } else if self.is_bool() {
            Decoded::Bool(self == Self::TRUE)
        } else {
            // NIL, plus any unassigned tag pattern a caller smuggled in
            // through from_bits.
            Decoded::Nil
        }
    }
}

impl Default for TaggedValue {
    fn default() -> Self {
        Self::NIL
    }
}

impl core::fmt::Debug for TaggedValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.decode() {
            Decoded::Number(n) => write!(f, "TaggedValue::Number({n})"),
            Decoded::Bool(b) => write!(f, "TaggedValue::Bool({b})"),
            Decoded::Nil => write!(f, "TaggedValue::Nil"),
            Decoded::Pointer(p) => write!(f, "TaggedValue::Pointer({p:#x})"),
        }
    }
}

impl From<f64> for TaggedValue {
    fn from(n: f64) -> Self {
        Self::number(n)
    }
}

impl From<bool> for TaggedValue {
    fn from(b: bool) -> Self {
        Self::boolean(b)
    }
}
