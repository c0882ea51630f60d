use crate::Alignable;
use crate::pairwise::dp::{Kernel, Recurrence};
use crate::pairwise::matrix::{DPMatrix, Layout};
use crate::pairwise::scoring;
use crate::pairwise::scout::Scout;

/// Row-major sweep over every node of the layout.
pub(crate) fn fill<Scheme, Seq1, Seq2, R, L>(
    kernel: &Kernel<'_, Scheme, Seq1, Seq2, R>,
    matrix: &mut DPMatrix<<Scheme as scoring::Scheme>::Score, L>,
    scout: &mut Scout<<Scheme as scoring::Scheme>::Score>,
) where
    Scheme: scoring::Scheme + ?Sized,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    R: Recurrence,
    L: Layout,
{
    for row in 0..matrix.layout().rows() {
        matrix.advance(row);
        for col in matrix.layout().span(row) {
            let (diag, up, left) = matrix.neighbours(col);
            let (cell, trace) = kernel.cell(row, col, &diag, &up, &left);
            matrix.store(col, cell, trace);
            scout.observe(row, col, &cell);
        }
    }
}
