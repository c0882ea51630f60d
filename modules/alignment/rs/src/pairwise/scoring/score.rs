use std::fmt::Debug;

/// Numeric type of alignment scores: a signed integer or a float with a dedicated
/// "unreachable" sentinel that plays the role of negative infinity.
pub trait Score:
    ::num::Num + ::num::Signed + Copy + PartialOrd + Debug + Default + Send + Sync + 'static
{
    /// Sentinel for cells that no alignment path can reach.
    const UNREACHABLE: Self;

    #[inline(always)]
    fn is_unreachable(&self) -> bool {
        *self == Self::UNREACHABLE
    }

    /// Sentinel-preserving addition: anything combined with `UNREACHABLE` stays unreachable
    /// and integer sums never wrap around.
    fn plus(self, rhs: Self) -> Self;
}

macro_rules! impl_integer_score {
    ($($t:ty),*) => {
        $(
            impl Score for $t {
                const UNREACHABLE: Self = <$t>::MIN;

                #[inline(always)]
                fn plus(self, rhs: Self) -> Self {
                    if self == Self::UNREACHABLE || rhs == Self::UNREACHABLE {
                        Self::UNREACHABLE
                    } else {
                        // Underflow saturates to MIN, i.e. the sum becomes unreachable
                        self.saturating_add(rhs)
                    }
                }
            }
        )*
    };
}

macro_rules! impl_float_score {
    ($($t:ty),*) => {
        $(
            impl Score for $t {
                const UNREACHABLE: Self = <$t>::NEG_INFINITY;

                #[inline(always)]
                fn plus(self, rhs: Self) -> Self {
                    self + rhs
                }
            }
        )*
    };
}

impl_integer_score!(i16, i32, i64, isize);
impl_float_score!(f32, f64);
