use crate::pairwise::scoring::Score;

/// Shape of the gap penalty, selected once per alignment call to pick the DP kernel.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum GapKind {
    /// Every gap position costs the same, there is no separate opening penalty.
    Linear,
    /// Gotoh-style open/extend penalties, tracked by two extra DP tracks.
    Affine,
}

// Gap scoring function MUST be additive.
// `seq1_*` penalties apply to gaps consuming seq1 symbols (vertical DP moves),
// `seq2_*` penalties apply to gaps consuming seq2 symbols (horizontal DP moves).
// `pos` is the index of the consumed symbol, and `open` is the score of the first gap position.
pub trait Scorer {
    type Score: Score;

    fn seq1_gap_open(&self, pos: usize) -> Self::Score;
    fn seq1_gap_extend(&self, pos: usize) -> Self::Score;

    fn seq2_gap_open(&self, pos: usize) -> Self::Score;
    fn seq2_gap_extend(&self, pos: usize) -> Self::Score;

    fn kind(&self) -> GapKind {
        GapKind::Affine
    }
}

pub trait PosInvariantScorer {
    type GapScore: Score;

    fn gap_open(&self) -> Self::GapScore;
    fn gap_extend(&self) -> Self::GapScore;

    fn gap_kind(&self) -> GapKind {
        GapKind::Affine
    }
}

impl<T: PosInvariantScorer> Scorer for T {
    type Score = <Self as PosInvariantScorer>::GapScore;

    #[inline(always)]
    fn seq1_gap_open(&self, _: usize) -> Self::Score {
        self.gap_open()
    }

    #[inline(always)]
    fn seq1_gap_extend(&self, _: usize) -> Self::Score {
        self.gap_extend()
    }

    #[inline(always)]
    fn seq2_gap_open(&self, _: usize) -> Self::Score {
        self.gap_open()
    }

    #[inline(always)]
    fn seq2_gap_extend(&self, _: usize) -> Self::Score {
        self.gap_extend()
    }

    #[inline(always)]
    fn kind(&self) -> GapKind {
        self.gap_kind()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Affine<S: Score> {
    pub open: S,
    pub extend: S,
}

impl<S: Score> Affine<S> {
    pub fn new(open: S, extend: S) -> Self {
        Self { open, extend }
    }
}

impl<S: Score> PosInvariantScorer for Affine<S> {
    type GapScore = S;

    #[inline(always)]
    fn gap_open(&self) -> Self::GapScore {
        self.open
    }

    #[inline(always)]
    fn gap_extend(&self) -> Self::GapScore {
        self.extend
    }
}

/// Constant per-position gap penalty.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Linear<S: Score> {
    pub gap: S,
}

impl<S: Score> Linear<S> {
    pub fn new(gap: S) -> Self {
        Self { gap }
    }
}

impl<S: Score> PosInvariantScorer for Linear<S> {
    type GapScore = S;

    #[inline(always)]
    fn gap_open(&self) -> Self::GapScore {
        self.gap
    }

    #[inline(always)]
    fn gap_extend(&self) -> Self::GapScore {
        self.gap
    }

    fn gap_kind(&self) -> GapKind {
        GapKind::Linear
    }
}
