use std::mem;
use std::ops::Range;

use crate::pairwise::dp::{Cell, Trace};
use crate::pairwise::scoring::Score;

use super::layout::Layout;
use super::traces::TraceMatrix;

/// Reusable DP buffers. Keeping a workspace between calls avoids reallocations.
#[derive(Debug)]
pub struct Workspace<S: Score> {
    rows: [Vec<Cell<S>>; 2],
    traces: Vec<Trace>,
}

impl<S: Score> Default for Workspace<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Score> Workspace<S> {
    pub fn new() -> Self {
        Self {
            rows: [Vec::new(), Vec::new()],
            traces: Vec::new(),
        }
    }

    /// Drop all cached allocations.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Return a trace buffer to the pool.
    pub fn recycle_traces(&mut self, traces: Vec<Trace>) {
        if traces.capacity() > self.traces.capacity() {
            self.traces = traces;
        }
    }
}

/// DP scores and traces of a single alignment.
///
/// Scores are only needed for the previous row, so the matrix keeps two rolling rows
/// of cells. Traces for the whole layout are kept when the traceback is requested.
#[derive(Debug)]
pub struct DPMatrix<S: Score, L: Layout> {
    layout: L,
    prev: Vec<Cell<S>>,
    curr: Vec<Cell<S>>,
    // Columns written into `prev` and `curr`
    spans: (Range<usize>, Range<usize>),
    row: usize,
    traces: Option<TraceMatrix<L>>,
}

impl<S: Score, L: Layout> DPMatrix<S, L> {
    /// Borrow buffers from the workspace and prepare them for the layout.
    pub fn recycle(layout: L, traceback: bool, workspace: &mut Workspace<S>) -> Self {
        let cols = layout.cols();
        let [mut prev, mut curr] = mem::take(&mut workspace.rows);
        for row in [&mut prev, &mut curr] {
            row.clear();
            row.resize(cols, Cell::unreachable());
        }

        let traces = if traceback {
            Some(TraceMatrix::from_buffer(
                layout.clone(),
                mem::take(&mut workspace.traces),
            ))
        } else {
            None
        };

        Self {
            layout,
            prev,
            curr,
            spans: (0..0, 0..0),
            row: 0,
            traces,
        }
    }

    /// Return buffers to the workspace, handing out the trace matrix (if any).
    pub fn release(self, workspace: &mut Workspace<S>) -> Option<TraceMatrix<L>> {
        workspace.rows = [self.prev, self.curr];
        self.traces
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Start computing `row`: the current row becomes the previous one.
    pub fn advance(&mut self, row: usize) {
        debug_assert!(row == 0 || row == self.row + 1);
        mem::swap(&mut self.prev, &mut self.curr);
        let stale = mem::replace(&mut self.spans.0, self.spans.1.clone());
        for cell in &mut self.curr[stale] {
            *cell = Cell::unreachable();
        }
        self.spans.1 = self.layout.span(row);
        self.row = row;
    }

    /// Predecessors (diagonal, up, left) of a node in the current row.
    /// Nodes outside of the layout read as unreachable.
    #[inline(always)]
    pub fn neighbours(&self, col: usize) -> (Cell<S>, Cell<S>, Cell<S>) {
        let unreachable = Cell::unreachable();
        let up = if self.row > 0 { self.prev[col] } else { unreachable };
        if col == 0 {
            return (unreachable, up, unreachable);
        }
        let diag = if self.row > 0 {
            self.prev[col - 1]
        } else {
            unreachable
        };
        (diag, up, self.curr[col - 1])
    }

    #[inline(always)]
    pub fn store(&mut self, col: usize, cell: Cell<S>, trace: Trace) {
        self.curr[col] = cell;
        if let Some(traces) = &mut self.traces {
            traces.set(self.row, col, trace);
        }
    }

    /// Cell of the current row.
    #[inline(always)]
    pub fn at(&self, col: usize) -> &Cell<S> {
        &self.curr[col]
    }
}
