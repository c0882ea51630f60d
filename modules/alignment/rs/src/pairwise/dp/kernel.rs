use std::marker::PhantomData;

use crate::Alignable;
use crate::pairwise::config::{EndGaps, Mode};
use crate::pairwise::scoring::{self, Score};
use crate::pairwise::traceback::Rules;

use super::cell::Cell;
use super::trace::{Source, Trace};

/// Gap-track update rule, selected once per alignment call.
pub trait Recurrence: Copy + Send + Sync + 'static {
    /// Gaps open from the diagonal track of the previous node instead of its best track.
    const OPENS_FROM_DIAGONAL: bool;

    /// Score of a gap track given the opening score of the previous node (`prior`),
    /// the same track of the previous node (`track`) and the gap penalties.
    /// Returns the score and whether the track extends `track` rather than opening a new gap.
    fn gap<S: Score>(prior: S, track: S, open: S, extend: S) -> (S, bool);
}

/// Single gap track, every gap position costs `open` (== `extend`).
#[derive(Copy, Clone, Debug, Default)]
pub struct LinearGaps;

impl Recurrence for LinearGaps {
    const OPENS_FROM_DIAGONAL: bool = false;

    #[inline(always)]
    fn gap<S: Score>(prior: S, _: S, open: S, _: S) -> (S, bool) {
        (prior.plus(open), false)
    }
}

/// Gotoh recurrence: a gap is either opened after a diagonal step or extended.
/// Opening wins ties.
#[derive(Copy, Clone, Debug, Default)]
pub struct AffineGaps;

impl Recurrence for AffineGaps {
    const OPENS_FROM_DIAGONAL: bool = true;

    #[inline(always)]
    fn gap<S: Score>(prior: S, track: S, open: S, extend: S) -> (S, bool) {
        let opened = prior.plus(open);
        let extended = track.plus(extend);
        if extended > opened {
            (extended, true)
        } else {
            (opened, false)
        }
    }
}

/// Where the DP window sits inside the input sequences.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct Origin {
    pub seq1: usize,
    pub seq2: usize,
}

/// Computes a single DP cell from its three predecessors. Shared by every filler:
/// the sequential sweep, wavefront blocks and packed lanes.
pub struct Kernel<'a, Scheme: ?Sized, Seq1: ?Sized, Seq2: ?Sized, R> {
    scheme: &'a Scheme,
    seq1: &'a Seq1,
    seq2: &'a Seq2,
    origin: Origin,
    local: bool,
    free: EndGaps,
    _recurrence: PhantomData<R>,
}

impl<Scheme: ?Sized, Seq1: ?Sized, Seq2: ?Sized, R> Clone for Kernel<'_, Scheme, Seq1, Seq2, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Scheme: ?Sized, Seq1: ?Sized, Seq2: ?Sized, R> Copy for Kernel<'_, Scheme, Seq1, Seq2, R> {}

impl<'a, Scheme, Seq1, Seq2, R> Kernel<'a, Scheme, Seq1, Seq2, R>
where
    Scheme: scoring::Scheme + ?Sized,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    R: Recurrence,
{
    pub fn new(
        scheme: &'a Scheme,
        seq1: &'a Seq1,
        seq2: &'a Seq2,
        origin: Origin,
        mode: Mode,
        end_gaps: EndGaps,
    ) -> Self {
        Self {
            scheme,
            seq1,
            seq2,
            origin,
            local: mode == Mode::Local,
            free: end_gaps,
            _recurrence: PhantomData,
        }
    }

    #[inline(always)]
    pub fn rules(&self) -> Rules {
        Rules {
            local: self.local,
            gaps_follow_diagonal: R::OPENS_FROM_DIAGONAL,
        }
    }

    /// In local mode every reachable node can fall back to the empty alignment.
    #[inline(always)]
    fn baseline(
        &self,
        score: <Scheme as scoring::Scheme>::Score,
    ) -> <Scheme as scoring::Scheme>::Score {
        if self.local && !score.is_unreachable() && score < ::num::Zero::zero() {
            ::num::Zero::zero()
        } else {
            score
        }
    }

    /// Best score of a predecessor as seen by its successors.
    #[inline(always)]
    fn prior(
        &self,
        cell: &Cell<<Scheme as scoring::Scheme>::Score>,
    ) -> <Scheme as scoring::Scheme>::Score {
        self.baseline(cell.best())
    }

    /// Score a gap opens from.
    #[inline(always)]
    fn opener(
        &self,
        cell: &Cell<<Scheme as scoring::Scheme>::Score>,
    ) -> <Scheme as scoring::Scheme>::Score {
        if R::OPENS_FROM_DIAGONAL {
            self.baseline(cell.diag)
        } else {
            self.prior(cell)
        }
    }

    /// Compute node (`row`, `col`) of the DP window. Predecessors outside of the layout
    /// must be passed as [`Cell::unreachable`].
    #[inline(always)]
    pub fn cell(
        &self,
        row: usize,
        col: usize,
        diag: &Cell<<Scheme as scoring::Scheme>::Score>,
        up: &Cell<<Scheme as scoring::Scheme>::Score>,
        left: &Cell<<Scheme as scoring::Scheme>::Score>,
    ) -> (Cell<<Scheme as scoring::Scheme>::Score>, Trace) {
        let unreachable = <Scheme as scoring::Scheme>::Score::UNREACHABLE;

        let start = (row == 0 && col == 0)
            || (self.local && (row == 0 || col == 0))
            || (row == 0 && self.free.seq2_leading)
            || (col == 0 && self.free.seq1_leading);
        if start {
            return (Cell::origin(), Trace::START);
        }

        let diag = if row > 0 && col > 0 {
            let (p1, p2) = (self.origin.seq1 + row - 1, self.origin.seq2 + col - 1);
            let score = self.scheme.score(p1, self.seq1.at(p1), p2, self.seq2.at(p2));
            self.prior(diag).plus(score)
        } else {
            unreachable
        };

        let (vert, vert_extends) = if row > 0 {
            let pos = self.origin.seq1 + row - 1;
            R::gap(
                self.opener(up),
                up.vert,
                self.scheme.seq1_gap_open(pos),
                self.scheme.seq1_gap_extend(pos),
            )
        } else {
            (unreachable, false)
        };

        let (horiz, horiz_extends) = if col > 0 {
            let pos = self.origin.seq2 + col - 1;
            R::gap(
                self.opener(left),
                left.horiz,
                self.scheme.seq2_gap_open(pos),
                self.scheme.seq2_gap_extend(pos),
            )
        } else {
            (unreachable, false)
        };

        let cell = Cell { diag, vert, horiz };
        let (best, source) = cell.best_source();
        if best.is_unreachable() {
            return (cell, Trace::START);
        }
        if self.local && best <= ::num::Zero::zero() {
            return (cell, Trace::new(Source::Start, vert_extends, horiz_extends));
        }

        let mut trace = Trace::new(source, vert_extends, horiz_extends);
        for (score, source) in [
            (diag, Source::Diagonal),
            (vert, Source::Vertical),
            (horiz, Source::Horizontal),
        ] {
            if score == best {
                trace = trace.with_tie(source);
            }
        }
        (cell, trace)
    }
}
