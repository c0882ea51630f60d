use std::ops::Range;

use derive_getters::Dissolve;

use crate::pairwise::dp::{Source, Trace};
use crate::pairwise::{Op, Step};

/// Random access to per-node traceback values.
pub trait TraceSource {
    /// Trace of a node. Nodes without a stored trace are reported as [`Trace::START`].
    fn trace(&self, row: usize, col: usize) -> Trace;
}

impl<T: TraceSource + ?Sized> TraceSource for &T {
    #[inline(always)]
    fn trace(&self, row: usize, col: usize) -> Trace {
        (**self).trace(row, col)
    }
}

/// Unlabelled alignment path: diagonal runs are `Op::Equivalent` until disambiguated.
#[derive(Clone, Eq, PartialEq, Debug, Dissolve)]
pub struct Path {
    pub steps: Vec<Step<usize>>,
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

/// How the traces of a DP fill link nodes together.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Rules {
    /// Local alignment: paths end with a diagonal step.
    pub local: bool,
    /// A gap opening is preceded by a diagonal step (affine gaps).
    /// Otherwise gaps open from the best track of the previous node.
    pub gaps_follow_diagonal: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum State {
    Best,
    Diagonal,
    Vertical,
    Horizontal,
    // Node reached by opening a gap
    Opened,
}

/// Walk the traces back from node (`row`, `col`) until a path start.
pub fn traceback<T: TraceSource + ?Sized>(
    source: &T,
    (row, col): (usize, usize),
    rules: Rules,
) -> Path {
    let end = (row, col);
    let (mut row, mut col) = (row, col);
    let opened = if rules.gaps_follow_diagonal {
        State::Opened
    } else {
        State::Best
    };
    let mut state = if rules.local && row > 0 && col > 0 {
        State::Diagonal
    } else {
        State::Best
    };

    let mut steps: Vec<Step<usize>> = Vec::new();
    let mut push = |op: Op| match steps.last_mut() {
        Some(last) if *last.op() == op => *last = Step::from_parts(op, last.length() + 1),
        _ => steps.push(Step::from_parts(op, 1)),
    };

    loop {
        match state {
            State::Best => {
                state = match source.trace(row, col).source() {
                    Source::Start => break,
                    Source::Diagonal => State::Diagonal,
                    Source::Vertical => State::Vertical,
                    Source::Horizontal => State::Horizontal,
                }
            }
            State::Opened => {
                state = match source.trace(row, col).source() {
                    Source::Start => break,
                    _ => State::Diagonal,
                }
            }
            State::Diagonal => {
                debug_assert!(row > 0 && col > 0);
                push(Op::Equivalent);
                (row, col) = (row - 1, col - 1);
                state = State::Best;
            }
            State::Vertical => {
                debug_assert!(row > 0);
                let extends = source.trace(row, col).vert_extends();
                push(Op::GapFirst);
                row -= 1;
                state = if extends { State::Vertical } else { opened };
            }
            State::Horizontal => {
                debug_assert!(col > 0);
                let extends = source.trace(row, col).horiz_extends();
                push(Op::GapSecond);
                col -= 1;
                state = if extends { State::Horizontal } else { opened };
            }
        }
    }

    steps.reverse();
    Path {
        steps,
        rows: row..end.0,
        cols: col..end.1,
    }
}
