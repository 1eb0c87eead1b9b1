//! Interned string identifier.
//!
//! Identifiers, type names, and string literal payloads are interned once and
//! referenced everywhere as a compact 32-bit handle. Equality on `Name` is a
//! single integer compare, which the matcher leans on heavily.

use std::fmt;

/// Interned string identifier.
///
/// Index into the [`StringInterner`](crate::StringInterner) that produced it.
/// Names from different interners must never be mixed; the matcher requires
/// the target and donor trees to share one interner.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string. Also used as the "unknown type" marker in
    /// scope constraint sets.
    pub const EMPTY: Name = Name(0);

    /// Create from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Get the raw index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the interner's string table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}
