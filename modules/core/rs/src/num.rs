use std::fmt::Debug;

/// Length of a run of identical alignment operations.
///
/// Sequences are addressed with `usize`, so conversions from and to `usize` saturate
/// instead of failing.
pub trait RunLength: ::num::PrimInt + ::num::Unsigned + Debug + Default {
    /// The run length as `usize`, saturating at `usize::MAX`.
    #[inline(always)]
    fn as_usize(self) -> usize {
        self.to_usize().unwrap_or(usize::MAX)
    }

    /// Longest prefix of a `len`-long run that fits into `Self`.
    #[inline(always)]
    fn saturating_from(len: usize) -> Self {
        <Self as ::num::NumCast>::from(len).unwrap_or_else(Self::max_value)
    }
}

impl<T: ::num::PrimInt + ::num::Unsigned + Debug + Default> RunLength for T {}
