use derive_getters::Dissolve;

use crate::Error;
use crate::pairwise::config::{EndGaps, Mode};
use crate::pairwise::dp::Cell;
use crate::pairwise::scoring::Score;

/// Candidate end node of the alignment.
#[derive(Copy, Clone, PartialEq, Debug, Dissolve)]
pub struct Hit<S: Score> {
    pub score: S,
    pub row: usize,
    pub col: usize,
}

impl<S: Score> Hit<S> {
    /// Higher score wins, ties go to the earliest node in row-major order.
    #[inline(always)]
    fn beats(&self, other: &Self) -> bool {
        self.score > other.score
            || (self.score == other.score && (self.row, self.col) < (other.row, other.col))
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum State {
    Scanning,
    Finalized,
}

/// Tracks the best alignment end node while the DP matrix is being filled.
///
/// Global alignments end at the bottom-right node, semi-global ones anywhere on the
/// free trailing edges and local ones at any diagonal step (or nowhere: the empty
/// alignment at the origin scores 0).
#[derive(Clone, Debug)]
pub struct Scout<S: Score> {
    mode: Mode,
    end_gaps: EndGaps,
    last: (usize, usize),
    state: State,
    best: Option<Hit<S>>,
}

impl<S: Score> Scout<S> {
    /// Scout for a `len1` x `len2` alignment.
    pub fn new(mode: Mode, end_gaps: EndGaps, len1: usize, len2: usize) -> Self {
        let best = match mode {
            Mode::Local => Some(Hit {
                score: S::zero(),
                row: 0,
                col: 0,
            }),
            Mode::Global | Mode::SemiGlobal => None,
        };
        Self {
            mode,
            end_gaps,
            last: (len1, len2),
            state: State::Scanning,
            best,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Offer a computed node to the scout.
    #[inline(always)]
    pub fn observe(&mut self, row: usize, col: usize, cell: &Cell<S>) {
        debug_assert_eq!(self.state, State::Scanning);
        let score = match self.mode {
            Mode::Local => cell.diag,
            Mode::Global => {
                if (row, col) != self.last {
                    return;
                }
                cell.best()
            }
            Mode::SemiGlobal => {
                let candidate = (row, col) == self.last
                    || (row == self.last.0 && self.end_gaps.seq2_trailing)
                    || (col == self.last.1 && self.end_gaps.seq1_trailing);
                if !candidate {
                    return;
                }
                cell.best()
            }
        };
        if !score.is_unreachable() {
            self.offer(Hit { score, row, col });
        }
    }

    #[inline(always)]
    fn offer(&mut self, hit: Hit<S>) {
        match &self.best {
            Some(best) if !hit.beats(best) => {}
            _ => self.best = Some(hit),
        }
    }

    /// Merge the result of a scout that observed another part of the same matrix.
    pub fn merge(&mut self, other: &Scout<S>) {
        debug_assert_eq!(self.state, State::Scanning);
        if let Some(hit) = other.best {
            self.offer(hit);
        }
    }

    /// Stop scanning and report the best end node.
    pub fn finalize(&mut self) -> Result<Hit<S>, Error> {
        self.state = State::Finalized;
        self.best.ok_or(Error::NoAlignment)
    }

    /// Best end node, available once the scout is finalized.
    pub fn best(&self) -> Option<&Hit<S>> {
        match self.state {
            State::Scanning => None,
            State::Finalized => self.best.as_ref(),
        }
    }
}
