//! Identifiers for registered kinds and dialects.

use std::fmt;

/// Process-unique identifier for a registered kind (type or operation)
/// or capability marker.
///
/// Allocated by [`Context::allocate_kind_id`] and never reused for the
/// life of the context. Exactly one definition owns each issued id.
///
/// [`Context::allocate_kind_id`]: crate::Context::allocate_kind_id
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct KindId(u32);

impl KindId {
    /// Create from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        KindId(raw)
    }

    /// Raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KindId({})", self.0)
    }
}

/// Index of a dialect within its owning [`Context`].
///
/// [`Context`]: crate::Context
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct DialectId(u32);

impl DialectId {
    /// Create from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        DialectId(raw)
    }

    /// Raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the context's dialect table.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for DialectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DialectId({})", self.0)
    }
}
