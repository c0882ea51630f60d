use std::fmt::Display;
use std::ops::Range;

use derive_getters::{Dissolve, Getters};
use derive_more::{Constructor, From, Into};

use crate::Alignable;
use crate::pairwise::scoring::{self, Score};

use super::offset::Offset;
use super::op::Op;
use super::step::{self, Step, StepWithOffset};

/// A pairwise alignment: its score, the run-length encoded path and the aligned
/// (clipped) ranges of both sequences.
#[derive(Clone, PartialEq, Debug, Getters, Constructor, Dissolve, From, Into)]
pub struct Alignment<S: Score> {
    score: S,
    steps: Vec<Step<usize>>,
    seq1: Range<usize>,
    seq2: Range<usize>,
}

impl<S: Score> Alignment<S> {
    /// Checks if the alignment is empty.
    pub fn is_empty(&self) -> bool {
        // Note: length of each step is guaranteed to be non-zero.
        self.steps.is_empty()
    }

    /// Returns the total length of the alignment - the number of alignment columns.
    pub fn len(&self) -> usize {
        self.steps.iter().map(Step::length).sum()
    }

    /// Returns the RLE representation of the alignment.
    pub fn rle(&self) -> String {
        Step::rle_string(self.steps.iter())
    }

    /// Returns alignment steps with tracked sequence coordinates.
    pub fn tracked_steps(&self) -> impl Iterator<Item = StepWithOffset<usize>> + '_ {
        step::track(&self.steps, Offset::new(self.seq1.start, self.seq2.start))
    }

    /// Recompute the score of the alignment path under the given scheme.
    /// Every maximal gap run is scored as one opening followed by extensions.
    pub fn rescore<Scheme, Seq1, Seq2>(&self, scheme: &Scheme, seq1: &Seq1, seq2: &Seq2) -> S
    where
        Scheme: scoring::Scheme<Score = S> + ?Sized,
        Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
        Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    {
        // Adjacent runs of the same gap type form a single gap
        let steps = Step::<usize>::repack::<usize>(&self.steps);

        let mut total = S::zero();
        for tracked in step::track(&steps, Offset::new(self.seq1.start, self.seq2.start)) {
            let (start, len) = (tracked.start, tracked.step.length());
            match tracked.step.op() {
                Op::GapFirst => {
                    total = total.plus(scheme.seq1_gap_open(start.seq1));
                    for pos in start.seq1 + 1..start.seq1 + len {
                        total = total.plus(scheme.seq1_gap_extend(pos));
                    }
                }
                Op::GapSecond => {
                    total = total.plus(scheme.seq2_gap_open(start.seq2));
                    for pos in start.seq2 + 1..start.seq2 + len {
                        total = total.plus(scheme.seq2_gap_extend(pos));
                    }
                }
                Op::Match | Op::Mismatch | Op::Equivalent => {
                    for k in 0..len {
                        let (p1, p2) = (start.seq1 + k, start.seq2 + k);
                        total = total.plus(scheme.score(p1, seq1.at(p1), p2, seq2.at(p2)));
                    }
                }
            }
        }
        total
    }

    /// Expand the alignment into two gapped rows of equal length, `None` marks a gap.
    pub fn gapped<'a, Symbol, Seq1, Seq2>(
        &self,
        seq1: &'a Seq1,
        seq2: &'a Seq2,
    ) -> (Vec<Option<&'a Symbol>>, Vec<Option<&'a Symbol>>)
    where
        Seq1: Alignable<Symbol = Symbol> + ?Sized,
        Seq2: Alignable<Symbol = Symbol> + ?Sized,
    {
        let total = self.len();
        let (mut row1, mut row2) = (Vec::with_capacity(total), Vec::with_capacity(total));
        for tracked in self.tracked_steps() {
            let start = tracked.start;
            for k in 0..tracked.step.length() {
                match tracked.step.op() {
                    Op::GapFirst => {
                        row1.push(Some(seq1.at(start.seq1 + k)));
                        row2.push(None);
                    }
                    Op::GapSecond => {
                        row1.push(None);
                        row2.push(Some(seq2.at(start.seq2 + k)));
                    }
                    Op::Match | Op::Mismatch | Op::Equivalent => {
                        row1.push(Some(seq1.at(start.seq1 + k)));
                        row2.push(Some(seq2.at(start.seq2 + k)));
                    }
                }
            }
        }
        (row1, row2)
    }

    /// Check that the steps consume exactly the aligned ranges.
    pub fn is_consistent(&self) -> bool {
        let end = self
            .tracked_steps()
            .last()
            .map(|x| x.end())
            .unwrap_or(Offset::new(self.seq1.start, self.seq2.start));
        end == Offset::new(self.seq1.end, self.seq2.end)
    }
}

impl<S: Score + Display> Display for Alignment<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}..{}] x [{}..{}] score={}",
            self.rle(),
            self.seq1.start,
            self.seq1.end,
            self.seq2.start,
            self.seq2.end,
            self.score
        )
    }
}
