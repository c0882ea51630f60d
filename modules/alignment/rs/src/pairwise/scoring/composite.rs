use derive_more::Constructor;

use super::{equiv, gaps, symbols, Scheme};

/// Scheme assembled from independent substitution, gap and equivalence scorers.
/// Score and symbol types are taken from the substitution scorer, the other parts must agree.
#[derive(Clone, Copy, Debug, Default, Constructor)]
pub struct Composite<S, G, E> {
    pub symbols: S,
    pub gaps: G,
    pub equiv: E,
}

impl<S, G: gaps::Scorer, E> gaps::Scorer for Composite<S, G, E> {
    type Score = G::Score;

    #[inline(always)]
    fn seq1_gap_open(&self, pos: usize) -> Self::Score {
        self.gaps.seq1_gap_open(pos)
    }

    #[inline(always)]
    fn seq1_gap_extend(&self, pos: usize) -> Self::Score {
        self.gaps.seq1_gap_extend(pos)
    }

    #[inline(always)]
    fn seq2_gap_open(&self, pos: usize) -> Self::Score {
        self.gaps.seq2_gap_open(pos)
    }

    #[inline(always)]
    fn seq2_gap_extend(&self, pos: usize) -> Self::Score {
        self.gaps.seq2_gap_extend(pos)
    }

    // Kernel selection must see through the composition
    fn kind(&self) -> gaps::GapKind {
        self.gaps.kind()
    }
}

impl<S: symbols::Scorer, G, E> symbols::Scorer for Composite<S, G, E> {
    type Score = S::Score;
    type Symbol = S::Symbol;

    #[inline(always)]
    fn score(
        &self,
        seq1pos: usize,
        s1: &Self::Symbol,
        seq2pos: usize,
        s2: &Self::Symbol,
    ) -> Self::Score {
        self.symbols.score(seq1pos, s1, seq2pos, s2)
    }
}

impl<S, G, E: equiv::Classifier> equiv::Classifier for Composite<S, G, E> {
    type Symbol = E::Symbol;

    #[inline(always)]
    fn classify(&self, s1: &Self::Symbol, s2: &Self::Symbol) -> equiv::Type {
        self.equiv.classify(s1, s2)
    }
}

impl<S, G, E> Scheme for Composite<S, G, E>
where
    S: symbols::Scorer,
    G: gaps::Scorer<Score = S::Score>,
    E: equiv::Classifier<Symbol = S::Symbol>,
{
    type Score = S::Score;
    type Symbol = S::Symbol;
}
