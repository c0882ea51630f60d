pub use composite::Composite;
pub use score::Score;

use crate::Error;

mod composite;
pub mod equiv;
pub mod gaps;
mod score;
pub mod symbols;

pub trait Scheme:
    gaps::Scorer<Score = <Self as Scheme>::Score>
    + symbols::Scorer<Score = <Self as Scheme>::Score, Symbol = <Self as Scheme>::Symbol>
    + equiv::Classifier<Symbol = <Self as Scheme>::Symbol>
{
    type Score: Score;
    type Symbol;
}

pub fn compose<S, G, E>(symbols: S, gaps: G, equiv: E) -> Composite<S, G, E>
where
    S: symbols::Scorer,
    G: gaps::Scorer<Score = S::Score>,
    E: equiv::Classifier<Symbol = S::Symbol>,
{
    Composite::new(symbols, gaps, equiv)
}

/// Check that gap penalties are monotonic: `open <= extend <= 0` for both sequences.
/// A gap that gets cheaper when it grows longer breaks the DP invariants.
pub fn validate<S: Scheme + ?Sized>(scheme: &S) -> Result<(), Error> {
    let zero: <S as Scheme>::Score = ::num::Zero::zero();
    let monotonic = |open: <S as Scheme>::Score, extend: <S as Scheme>::Score| {
        open <= extend && extend <= zero
    };

    if monotonic(scheme.seq1_gap_open(0), scheme.seq1_gap_extend(0))
        && monotonic(scheme.seq2_gap_open(0), scheme.seq2_gap_extend(0))
    {
        Ok(())
    } else {
        Err(Error::NonMonotonicGaps)
    }
}
