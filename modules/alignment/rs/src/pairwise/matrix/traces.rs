use crate::pairwise::dp::Trace;
use crate::pairwise::traceback::TraceSource;

use super::layout::Layout;

/// Traceback values of every node in the layout.
#[derive(Clone, Debug)]
pub struct TraceMatrix<L: Layout> {
    layout: L,
    traces: Vec<Trace>,
}

impl<L: Layout> TraceMatrix<L> {
    pub fn new(layout: L) -> Self {
        Self::from_buffer(layout, Vec::new())
    }

    /// Reuse an existing allocation for the new layout.
    pub fn from_buffer(layout: L, mut traces: Vec<Trace>) -> Self {
        traces.clear();
        traces.resize(layout.capacity(), Trace::START);
        Self { layout, traces }
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, trace: Trace) {
        let index = self.layout.index(row, col);
        self.traces[index] = trace;
    }

    /// Release the underlying buffer.
    pub fn into_buffer(self) -> Vec<Trace> {
        self.traces
    }
}

impl<L: Layout> TraceSource for TraceMatrix<L> {
    /// Nodes outside of the layout are reported as path starts.
    #[inline(always)]
    fn trace(&self, row: usize, col: usize) -> Trace {
        match self.layout.get(row, col) {
            Some(index) => self.traces[index],
            None => Trace::START,
        }
    }
}
