use crate::pairwise::scoring::Score;

use super::trace::Source;

/// Scores of the best paths ending at a DP node with a diagonal step (`diag`),
/// a vertical gap step consuming seq1 (`vert`) or a horizontal gap step consuming seq2 (`horiz`).
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Cell<S: Score> {
    pub diag: S,
    pub vert: S,
    pub horiz: S,
}

impl<S: Score> Default for Cell<S> {
    fn default() -> Self {
        Self::unreachable()
    }
}

impl<S: Score> Cell<S> {
    #[inline(always)]
    pub fn unreachable() -> Self {
        Self {
            diag: S::UNREACHABLE,
            vert: S::UNREACHABLE,
            horiz: S::UNREACHABLE,
        }
    }

    /// Empty alignment anchored at this node.
    #[inline(always)]
    pub fn origin() -> Self {
        Self {
            diag: S::zero(),
            vert: S::UNREACHABLE,
            horiz: S::UNREACHABLE,
        }
    }

    /// The best track of the cell. Ties resolve as diagonal > vertical > horizontal.
    #[inline(always)]
    pub fn best_source(&self) -> (S, Source) {
        let mut best = (self.diag, Source::Diagonal);
        if self.vert > best.0 {
            best = (self.vert, Source::Vertical);
        }
        if self.horiz > best.0 {
            best = (self.horiz, Source::Horizontal);
        }
        best
    }

    #[inline(always)]
    pub fn best(&self) -> S {
        self.best_source().0
    }

    #[inline(always)]
    pub fn is_unreachable(&self) -> bool {
        self.best().is_unreachable()
    }
}
